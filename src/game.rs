//! Live game layer.
//!
//! - Barrier (gate) with hit counting, breach and flicker
//! - Containment view restricting caged agents to the area near the gate
//! - Pursuit strategies, one per agent role
//! - Agent state machine and sub-tile movement
//! - Arena layouts and the tick-driven [`Simulation`] context

mod agent;
mod arena;
mod barrier;
mod config;
mod containment;
mod simulation;
mod strategy;

pub use agent::{Agent, AgentState, Phase, Role, TickContext, TickOutcome};
pub use arena::{Arena, BUILTIN_LAYOUT};
pub use barrier::{Barrier, BarrierState, HITS_TO_BREACH, TileRect};
pub use config::SimulationConfig;
pub use containment::ContainmentView;
pub use simulation::{Simulation, TickReport};
pub use strategy::{
    AStarPursuit, AdversarialPursuit, BfsPursuit, MAX_DETOUR, Plan, PlanContext, PlayerSlot,
    Pursuit, ReplaySequence, random_step,
};
