//! Initial population strategies.

use crate::gp::partition::Partition;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// How the first generation is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStrategy {
    /// Uniformly random group ids, canonicalized.
    Random,
    /// The identity genome, then single-pair merges, then random genomes.
    #[default]
    Structured,
}

/// A genome of `num_states` independent uniform draws from `0..num_states`.
#[must_use]
pub fn random_genome<R: Rng>(num_states: usize, rng: &mut R) -> Partition {
    let genes: Vec<usize> = (0..num_states)
        .map(|_| rng.gen_range(0..num_states))
        .collect();
    Partition::new(&genes)
}

/// Create the first generation.
///
/// Under [`InitStrategy::Structured`], genome `0` is the identity partition
/// and up to half the population (bounded by the number of state pairs) are
/// distinct single-pair merges of it; the remainder is random.
#[must_use]
pub fn initialize_population<R: Rng>(
    num_states: usize,
    population_size: usize,
    strategy: InitStrategy,
    rng: &mut R,
) -> Vec<Partition> {
    let mut population = Vec::with_capacity(population_size);

    if strategy == InitStrategy::Structured && population_size > 0 {
        population.push(Partition::identity(num_states));

        let total_pairs = num_states * num_states.saturating_sub(1) / 2;
        let merges = (population_size / 2).min(total_pairs);
        for k in index::sample(rng, total_pairs, merges) {
            let (i, j) = pair_at(num_states, k);
            population.push(Partition::merge_pair(num_states, i, j));
        }
    }

    while population.len() < population_size {
        population.push(random_genome(num_states, rng));
    }

    population
}

/// The `k`-th pair `(i, j)` with `i < j < n` in lexicographic order.
fn pair_at(n: usize, mut k: usize) -> (usize, usize) {
    for i in 0..n {
        let row = n - 1 - i;
        if k < row {
            return (i, i + 1 + k);
        }
        k -= row;
    }
    (0, 0)
}
