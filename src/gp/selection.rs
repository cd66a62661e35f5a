//! Selection operators for the path synthesizer.
//!
//! Parents are drawn by fitness-proportionate ("roulette wheel") selection.
//! The single best individual survives unchanged.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use rand::Rng;

/// Result of selection: indices into the current population.
#[derive(Debug)]
pub struct SelectionResult {
    /// Index of the individual carried over unchanged, if any.
    pub elite_index: Option<usize>,
    /// Pairs of parent indices, one child per pair.
    pub parent_pairs: Vec<(usize, usize)>,
}

/// Select the elite and enough parent pairs to fill `target_size` slots.
#[must_use]
pub fn select_parents<R: Rng>(fitness: &[f64], target_size: usize, rng: &mut R) -> SelectionResult {
    if fitness.is_empty() || target_size == 0 {
        return SelectionResult {
            elite_index: None,
            parent_pairs: Vec::new(),
        };
    }

    let elite_index = fitness
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.total_cmp(b).then(ib.cmp(ia)))
        .map(|(i, _)| i);

    let parent_pairs = (0..target_size - 1)
        .map(|_| (select_index(fitness, rng), select_index(fitness, rng)))
        .collect();

    SelectionResult {
        elite_index,
        parent_pairs,
    }
}

/// Roulette-wheel pick: index `i` is chosen with probability
/// `fitness[i] / sum(fitness)`.
///
/// Negative fitness counts as zero. When the total is not positive every
/// index is equally likely. Returns 0 for an empty slice.
pub fn select_index<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    if fitness.is_empty() {
        return 0;
    }
    let total: f64 = fitness.iter().map(|f| f.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.gen_range(0..fitness.len());
    }

    let pick = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, f) in fitness.iter().enumerate() {
        cumulative += f.max(0.0);
        if cumulative > pick {
            return i;
        }
    }
    // Rounding can leave the pick just past the final boundary.
    fitness.len() - 1
}

/// Summary statistics of a population's fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let n = fitness.len() as f64;
        let mean = fitness.iter().sum::<f64>() / n;
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let variance = fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_elite_is_first_best() {
        let mut rng = SmallRng::seed_from_u64(42);
        let result = select_parents(&[1.0, 5.0, 3.0, 5.0], 4, &mut rng);
        assert_eq!(result.elite_index, Some(1));
        assert_eq!(result.parent_pairs.len(), 3);
    }

    #[test]
    fn test_empty_population() {
        let mut rng = SmallRng::seed_from_u64(42);
        let result = select_parents(&[], 10, &mut rng);
        assert!(result.elite_index.is_none());
        assert!(result.parent_pairs.is_empty());
        assert_eq!(select_index(&[], &mut rng), 0);
    }

    #[test]
    fn test_roulette_never_picks_zero_weight() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = [0.0, 2.0, 0.0, 1.0];
        for _ in 0..500 {
            let idx = select_index(&fitness, &mut rng);
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_roulette_is_proportional() {
        let mut rng = SmallRng::seed_from_u64(7);
        let fitness = [1.0, 3.0];
        let picks = (0..4000).filter(|_| select_index(&fitness, &mut rng) == 1).count();
        // Expect ~3000; allow generous slack.
        assert!((2700..3300).contains(&picks), "picked index 1 {picks} times");
    }

    #[test]
    fn test_zero_total_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(3);
        let fitness = [0.0; 4];
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[select_index(&fitness, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_stats() {
        let stats = SelectionStats::from_fitness(&[1.0, 2.0, 3.0]);
        assert!((stats.mean_fitness - 2.0).abs() < 1e-12);
        assert!((stats.best_fitness - 3.0).abs() < 1e-12);
        assert!((stats.worst_fitness - 1.0).abs() < 1e-12);
        assert!((stats.fitness_std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
