//! Single-point crossover.

use rand::Rng;

use crate::gp::genome::GeneDna;

/// Combine two parents at a random cut: the child takes `parent1`'s genes
/// before the cut and `parent2`'s genes from the cut onward.
///
/// The cut is drawn from `0..parent1.len()`, so the child always carries at
/// least one gene from `parent2` when it has any.
#[must_use]
pub fn crossover<R: Rng>(parent1: &GeneDna, parent2: &GeneDna, rng: &mut R) -> GeneDna {
    if parent1.is_empty() {
        return GeneDna::new(parent2.genes.clone());
    }
    let cut = rng.gen_range(0..parent1.len());
    let tail = parent2.genes.get(cut..).unwrap_or_default();

    let mut genes = Vec::with_capacity(cut + tail.len());
    genes.extend_from_slice(&parent1.genes[..cut]);
    genes.extend_from_slice(tail);
    GeneDna::new(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_child_is_prefix_plus_suffix() {
        let a = GeneDna::new(vec![Direction::Up; 10]);
        let b = GeneDna::new(vec![Direction::Down; 10]);
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..50 {
            let child = crossover(&a, &b, &mut rng);
            assert_eq!(child.len(), 10);
            let cut = child.genes.iter().take_while(|&&d| d == Direction::Up).count();
            assert!(cut < 10);
            assert!(child.genes[cut..].iter().all(|&d| d == Direction::Down));
        }
    }

    #[test]
    fn test_child_fitness_reset() {
        let mut a = GeneDna::new(vec![Direction::Left; 4]);
        a.fitness = 9.0;
        let b = GeneDna::new(vec![Direction::Right; 4]);
        let child = crossover(&a, &b, &mut SmallRng::seed_from_u64(1));
        assert!(child.fitness.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_parent() {
        let a = GeneDna::new(Vec::new());
        let b = GeneDna::new(vec![Direction::Right; 3]);
        let child = crossover(&a, &b, &mut SmallRng::seed_from_u64(1));
        assert_eq!(child.genes, b.genes);
    }
}
