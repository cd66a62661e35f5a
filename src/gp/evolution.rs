//! Main training loop for the path synthesizer.
//!
//! Each generation: evaluate, sort by fitness, record statistics, then
//! breed the next population from the elite and roulette-selected parents.

// Training uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::error::TrainingError;
use crate::gp::crossover::crossover;
use crate::gp::fitness::{Scenario, evaluate_population, simulate};
use crate::gp::genome::GeneDna;
use crate::gp::mutation::{MutationConfig, mutate};
use crate::gp::persistence::TrainedPath;
use crate::gp::selection::{SelectionStats, select_parents};
use crate::grid::{Grid, Position};

/// Configuration for a training run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Genes per individual.
    pub gene_length: usize,
    /// Generations to run.
    pub generations: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// Tile every sequence starts from.
    pub start: Position,
    /// Tile sequences are rewarded for staying near.
    pub target: Position,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            gene_length: 20,
            generations: 100,
            mutation_rate: 0.1,
            seed: 42,
            start: Position::new(10, 10),
            target: Position::new(5, 5),
        }
    }
}

impl TrainingConfig {
    /// Check the configuration against a grid.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty population or gene sequence, a mutation
    /// rate outside `[0, 1]`, or a start or target tile outside the grid.
    pub fn validate(&self, grid: &Grid) -> Result<(), TrainingError> {
        if self.population_size == 0 {
            return Err(TrainingError::EmptyPopulation);
        }
        if self.gene_length == 0 {
            return Err(TrainingError::EmptyGenes);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TrainingError::InvalidMutationRate(self.mutation_rate));
        }
        if !grid.in_bounds(self.start) {
            return Err(TrainingError::StartOutOfBounds(self.start));
        }
        if !grid.in_bounds(self.target) {
            return Err(TrainingError::TargetOutOfBounds(self.target));
        }
        Ok(())
    }

    fn mutation(&self) -> MutationConfig {
        MutationConfig {
            gene_rate: self.mutation_rate,
        }
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Best individual of the final generation.
    pub best: GeneDna,
    /// The best individual's trajectory from the training start.
    pub path: TrainedPath,
    /// Statistics per generation.
    pub generations: Vec<GenerationStats>,
}

/// A generation of gene sequences plus the RNG that breeds the next one.
#[derive(Debug)]
pub struct Population {
    individuals: Vec<GeneDna>,
    generation: usize,
    mutation: MutationConfig,
    rng: SmallRng,
}

impl Population {
    /// Create `size` random individuals of `gene_length` genes.
    #[must_use]
    pub fn random(size: usize, gene_length: usize, mutation: MutationConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let individuals = (0..size).map(|_| GeneDna::random(&mut rng, gene_length)).collect();
        Self {
            individuals,
            generation: 0,
            mutation,
            rng,
        }
    }

    /// Individuals, sorted by fitness descending after [`Population::evaluate`].
    #[must_use]
    pub fn individuals(&self) -> &[GeneDna] {
        &self.individuals
    }

    /// Number of generations bred so far.
    #[must_use]
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// The current best individual, valid after [`Population::evaluate`].
    #[must_use]
    pub fn best(&self) -> Option<&GeneDna> {
        self.individuals.first()
    }

    /// Score every individual and sort by fitness descending.
    ///
    /// The sort is stable, so equally fit individuals keep their order.
    pub fn evaluate(&mut self, scenario: &Scenario<'_, Grid>) -> SelectionStats {
        evaluate_population(&mut self.individuals, scenario);
        self.individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        let fitness: Vec<f64> = self.individuals.iter().map(|d| d.fitness).collect();
        SelectionStats::from_fitness(&fitness)
    }

    /// Replace the population with the next generation.
    ///
    /// The fittest individual is carried over unchanged; every other slot is
    /// a mutated crossover of two roulette-selected parents.
    pub fn evolve(&mut self) {
        let size = self.individuals.len();
        let fitness: Vec<f64> = self.individuals.iter().map(|d| d.fitness).collect();
        let selection = select_parents(&fitness, size, &mut self.rng);

        let mut next = Vec::with_capacity(size);
        if let Some(idx) = selection.elite_index {
            next.push(self.individuals[idx].clone());
        }
        for (p1, p2) in selection.parent_pairs {
            let mut child = crossover(&self.individuals[p1], &self.individuals[p2], &mut self.rng);
            mutate(&mut child, &self.mutation, &mut self.rng);
            next.push(child);
        }

        self.individuals = next;
        self.generation += 1;
    }
}

/// Run a full training session.
///
/// # Errors
///
/// Returns an error if the configuration is invalid for `grid`.
pub fn train(grid: &Grid, config: &TrainingConfig) -> Result<TrainingReport, TrainingError> {
    train_with_callback(grid, config, |_| {})
}

/// Run a full training session, calling `on_generation` after each
/// generation is evaluated.
///
/// # Errors
///
/// Returns an error if the configuration is invalid for `grid`.
pub fn train_with_callback<F>(
    grid: &Grid,
    config: &TrainingConfig,
    mut on_generation: F,
) -> Result<TrainingReport, TrainingError>
where
    F: FnMut(&GenerationStats),
{
    config.validate(grid)?;

    let scenario = Scenario {
        grid,
        start: config.start,
        target: config.target,
    };
    let mut population = Population::random(
        config.population_size,
        config.gene_length,
        config.mutation(),
        config.seed,
    );
    let mut generations = Vec::with_capacity(config.generations);

    for generation in 0..config.generations {
        let stats = population.evaluate(&scenario);
        let gen_stat = GenerationStats {
            generation,
            best_fitness: stats.best_fitness,
            mean_fitness: stats.mean_fitness,
            fitness_std: stats.fitness_std,
        };
        tracing::debug!(
            generation,
            best = gen_stat.best_fitness,
            mean = gen_stat.mean_fitness,
            std = gen_stat.fitness_std,
            "generation evaluated"
        );
        on_generation(&gen_stat);
        generations.push(gen_stat);
        population.evolve();
    }

    // The final generation has been bred but not yet scored.
    population.evaluate(&scenario);
    let best = population
        .best()
        .cloned()
        .ok_or(TrainingError::EmptyPopulation)?;
    let path = TrainedPath::new(simulate(&best.genes, config.start, grid));

    tracing::info!(
        generations = config.generations,
        best_fitness = best.fitness,
        waypoints = path.len(),
        "training complete"
    );

    Ok(TrainingReport {
        best,
        path,
        generations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            population_size: 20,
            gene_length: 12,
            generations: 15,
            ..TrainingConfig::default()
        }
    }

    #[test]
    fn test_training_config_default() {
        let config = TrainingConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.gene_length, 20);
        assert_eq!(config.generations, 100);
        assert_eq!(config.start, Position::new(10, 10));
        assert_eq!(config.target, Position::new(5, 5));
    }

    #[test]
    fn test_validate() {
        let grid = Grid::open(21, 21).unwrap();
        let bad_pop = TrainingConfig {
            population_size: 0,
            ..TrainingConfig::default()
        };
        assert!(matches!(bad_pop.validate(&grid), Err(TrainingError::EmptyPopulation)));
        let bad_rate = TrainingConfig {
            mutation_rate: 1.5,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            bad_rate.validate(&grid),
            Err(TrainingError::InvalidMutationRate(_))
        ));
        let bad_start = TrainingConfig {
            start: Position::new(30, 0),
            ..TrainingConfig::default()
        };
        assert!(matches!(
            bad_start.validate(&grid),
            Err(TrainingError::StartOutOfBounds(_))
        ));
        let bad_target = TrainingConfig {
            target: Position::new(i32::MAX, 0),
            ..TrainingConfig::default()
        };
        assert!(matches!(
            bad_target.validate(&grid),
            Err(TrainingError::TargetOutOfBounds(_))
        ));
    }

    #[test]
    fn test_elite_fitness_non_decreasing() {
        let grid = Grid::open(21, 21).unwrap();
        let report = train(&grid, &small_config()).unwrap();
        for pair in report.generations.windows(2) {
            assert!(
                pair[1].best_fitness >= pair[0].best_fitness,
                "generation {} regressed",
                pair[1].generation
            );
        }
        let last = report.generations.last().unwrap();
        assert!(report.best.fitness >= last.best_fitness);
    }

    #[test]
    fn test_population_size_is_stable() {
        let grid = Grid::open(9, 9).unwrap();
        let scenario = Scenario {
            grid: &grid,
            start: Position::new(4, 4),
            target: Position::new(0, 0),
        };
        let mut population = Population::random(10, 8, MutationConfig::default(), 1);
        for _ in 0..5 {
            population.evaluate(&scenario);
            population.evolve();
            assert_eq!(population.individuals().len(), 10);
        }
        assert_eq!(population.generation(), 5);
    }

    #[test]
    fn test_evaluate_sorts_descending() {
        let grid = Grid::open(9, 9).unwrap();
        let scenario = Scenario {
            grid: &grid,
            start: Position::new(4, 4),
            target: Position::new(8, 8),
        };
        let mut population = Population::random(16, 10, MutationConfig::default(), 3);
        population.evaluate(&scenario);
        for pair in population.individuals().windows(2) {
            assert!(pair[0].fitness >= pair[1].fitness);
        }
    }

    #[test]
    fn test_path_matches_best_genes() {
        let grid = Grid::open(21, 21).unwrap();
        let config = small_config();
        let report = train(&grid, &config).unwrap();
        assert_eq!(report.path.len(), config.gene_length);
        assert_eq!(
            report.path.waypoints(),
            simulate(&report.best.genes, config.start, &grid).as_slice()
        );
    }

    #[test]
    fn test_seeded_runs_agree() {
        let grid = Grid::open(21, 21).unwrap();
        let a = train(&grid, &small_config()).unwrap();
        let b = train(&grid, &small_config()).unwrap();
        assert_eq!(a.best.genes, b.best.genes);
        assert_eq!(a.path, b.path);
    }

    #[test]
    fn test_callback_sees_every_generation() {
        let grid = Grid::open(21, 21).unwrap();
        let mut seen = 0;
        train_with_callback(&grid, &small_config(), |_| seen += 1).unwrap();
        assert_eq!(seen, small_config().generations);
    }
}
