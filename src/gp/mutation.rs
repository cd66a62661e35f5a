//! Per-gene mutation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::gp::genome::GeneDna;
use crate::grid::Direction;

/// Configuration for mutation operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Independent probability of replacing each gene with a random move.
    pub gene_rate: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { gene_rate: 0.1 }
    }
}

/// Mutate a gene sequence in place.
///
/// A replaced gene may be redrawn as the move it already was.
pub fn mutate<R: Rng>(dna: &mut GeneDna, config: &MutationConfig, rng: &mut R) {
    let rate = config.gene_rate.clamp(0.0, 1.0);
    for gene in &mut dna.genes {
        if rng.gen_bool(rate) {
            *gene = Direction::random(rng);
        }
    }
}
