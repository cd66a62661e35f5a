//! Gene sequences.
//!
//! A gene is a single attempted move. A sequence is applied from a fixed
//! start tile, one gene per step, with illegal moves leaving the position
//! unchanged.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Direction;

/// One individual: a fixed-length move sequence and its last evaluated fitness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneDna {
    /// Moves in application order.
    pub genes: Vec<Direction>,
    /// Fitness from the most recent evaluation; higher is better.
    pub fitness: f64,
}

impl GeneDna {
    /// Wrap an existing gene sequence with zero fitness.
    #[must_use]
    pub fn new(genes: Vec<Direction>) -> Self {
        Self { genes, fitness: 0.0 }
    }

    /// Create a sequence of `length` uniformly random moves.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, length: usize) -> Self {
        Self::new((0..length).map(|_| Direction::random(rng)).collect())
    }

    /// Number of genes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// True if the sequence has no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}
