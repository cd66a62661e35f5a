//! Fitness evaluation for gene sequences.
//!
//! Fitness rewards proximity over the whole trajectory rather than just the
//! end point: after every gene, `1 / (manhattan + 1)` is added.

use rayon::prelude::*;

use crate::gp::genome::GeneDna;
use crate::grid::{Direction, Position, Walkable};

/// Fixed evaluation setting shared by every individual in a run.
#[derive(Debug)]
pub struct Scenario<'a, W: ?Sized> {
    /// Maze the moves are applied to.
    pub grid: &'a W,
    /// Tile the sequence starts from.
    pub start: Position,
    /// Tile the sequence should stay close to.
    pub target: Position,
}

/// Apply `genes` from `start`, returning the tile reached after each gene.
///
/// A gene whose destination is not open is spent without moving, so the
/// trajectory repeats the current tile.
#[must_use]
pub fn simulate<W: Walkable + ?Sized>(genes: &[Direction], start: Position, grid: &W) -> Vec<Position> {
    let mut current = start;
    genes
        .iter()
        .map(|&dir| {
            let next = current.step(dir);
            if grid.is_open(next) {
                current = next;
            }
            current
        })
        .collect()
}

/// Proximity fitness of a gene sequence in `scenario`.
#[must_use]
pub fn proximity_fitness<W: Walkable + ?Sized>(genes: &[Direction], scenario: &Scenario<'_, W>) -> f64 {
    simulate(genes, scenario.start, scenario.grid)
        .into_iter()
        .map(|pos| 1.0 / (f64::from(pos.manhattan(scenario.target)) + 1.0))
        .sum()
}

/// Evaluate every individual in parallel, storing the result in `fitness`.
pub fn evaluate_population<W: Walkable + Sync + ?Sized>(
    population: &mut [GeneDna],
    scenario: &Scenario<'_, W>,
) {
    population.par_iter_mut().for_each(|dna| {
        dna.fitness = proximity_fitness(&dna.genes, scenario);
    });
}
