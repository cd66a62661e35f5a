// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Ghostgate: deterministic ghost AI for a maze-chase game.
//!
//! Four caged agents batter a gate until it breaks, then hunt two players
//! through a grid maze, each with its own search strategy:
//! - Breadth-first and A* pursuit along shortest paths
//! - Depth-bounded minimax with alpha-beta pruning
//! - Replay of a path evolved offline by a genetic algorithm
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Simulation (tick loop)          │
//! ├─────────────────────────────────────┤
//! │  Agents │ Barrier │ Strategies      │
//! ├─────────────────────────────────────┤
//! │  Search (BFS, A*, minimax) │  GP    │
//! ├─────────────────────────────────────┤
//! │         Grid Model                  │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod gp;
pub mod grid;
pub mod search;

pub use error::{ConfigError, LayoutError, PathFileError, TrainingError};

// Re-export key types at crate root for convenience
pub use game::{Agent, AgentState, Arena, Barrier, Role, Simulation, SimulationConfig};
pub use gp::{TrainedPath, TrainingConfig};
pub use grid::{Cell, Direction, Grid, Position, Walkable};
pub use search::{Path, adversarial_move, astar, bfs};
