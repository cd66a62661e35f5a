//! Evolutionary path synthesis.
//!
//! An offline genetic algorithm evolves a fixed-length sequence of moves
//! that keeps an agent close to a target for as long as possible. The best
//! sequence is replayed from its start tile and persisted as a trajectory,
//! which an agent later follows one waypoint per planning step.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Training Loop               │
//! ├─────────────────────────────────────┤
//! │  Roulette │ Crossover │ Mutation    │
//! ├─────────────────────────────────────┤
//! │   Proximity Fitness (rayon)         │
//! ├─────────────────────────────────────┤
//! │   Trajectory → JSON artifact        │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ghostgate::gp::{TrainingConfig, train};
//! use ghostgate::grid::Grid;
//!
//! let grid = Grid::open(21, 21).ok_or("empty grid")?;
//! let report = train(&grid, &TrainingConfig::default())?;
//! report.path.save("trained_path.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod crossover;
mod evolution;
mod fitness;
mod genome;
mod mutation;
mod persistence;
mod selection;

pub use crossover::crossover;
pub use evolution::{
    GenerationStats, Population, TrainingConfig, TrainingReport, train, train_with_callback,
};
pub use fitness::{Scenario, evaluate_population, proximity_fitness, simulate};
pub use genome::GeneDna;
pub use mutation::{MutationConfig, mutate};
pub use persistence::{MAX_COORDINATE, TrainedPath};
pub use selection::{SelectionResult, SelectionStats, select_index, select_parents};
