//! Mutation for partition genomes.
//!
//! A mutation moves one state to another group: either an existing one or a
//! brand-new group. It is applied to a fraction of the offspring, not per
//! gene.

// Mutation uses intentional casts for the offspring fraction
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::gp::partition::Partition;
use rand::Rng;
use rand::seq::index;

/// Reassign one random state to a random existing group or a new group.
#[must_use]
pub fn mutate<R: Rng>(genome: &Partition, rng: &mut R) -> Partition {
    if genome.is_empty() {
        return genome.clone();
    }

    let mut genes = genome.genes().to_vec();
    let state = rng.gen_range(0..genes.len());
    // Canonical ids are exactly 0..group_count; group_count itself is new.
    genes[state] = rng.gen_range(0..=genome.group_count());
    Partition::new(&genes)
}

/// Number of offspring mutated for a given fraction.
///
/// Zero only when `fraction` is zero; otherwise at least one.
#[must_use]
pub fn mutation_count(offspring: usize, fraction: f64) -> usize {
    if offspring == 0 || fraction <= 0.0 {
        return 0;
    }
    ((fraction * offspring as f64) as usize).clamp(1, offspring)
}

/// Mutate a distinct random subset of `offspring` in place.
///
/// Returns the indices that were mutated.
pub fn mutate_population<R: Rng>(
    offspring: &mut [Partition],
    fraction: f64,
    rng: &mut R,
) -> Vec<usize> {
    let count = mutation_count(offspring.len(), fraction);
    let chosen = index::sample(rng, offspring.len(), count).into_vec();
    for &i in &chosen {
        offspring[i] = mutate(&offspring[i], rng);
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::partition::is_canonical;
    use crate::gp::population::random_genome;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_mutation_is_canonical() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..500 {
            let genome = random_genome(8, &mut rng);
            let mutant = mutate(&genome, &mut rng);
            assert_eq!(mutant.len(), 8);
            assert!(is_canonical(mutant.genes()));
        }
    }

    #[test]
    fn test_mutation_changes_at_most_one_state() {
        let mut rng = SmallRng::seed_from_u64(11);
        let genome = Partition::identity(6);
        for _ in 0..100 {
            let mutant = mutate(&genome, &mut rng);
            // Moving one state out of the identity merges at most one pair.
            assert!(mutant.group_count() >= 5);
        }
    }

    #[test]
    fn test_mutation_can_open_new_group() {
        let mut rng = SmallRng::seed_from_u64(13);
        let genome = Partition::single_group(5);
        let split = (0..200).any(|_| mutate(&genome, &mut rng).group_count() == 2);
        assert!(split);
    }

    #[test]
    fn test_mutation_count() {
        assert_eq!(mutation_count(100, 0.1), 10);
        assert_eq!(mutation_count(5, 0.1), 1);
        assert_eq!(mutation_count(5, 0.0), 0);
        assert_eq!(mutation_count(5, 1.0), 5);
        assert_eq!(mutation_count(0, 0.5), 0);
    }

    #[test]
    fn test_mutate_population_distinct_indices() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut offspring: Vec<Partition> = (0..20).map(|_| Partition::identity(4)).collect();
        let mut chosen = mutate_population(&mut offspring, 0.25, &mut rng);
        chosen.sort_unstable();
        chosen.dedup();
        assert_eq!(chosen.len(), 5);
    }
}
