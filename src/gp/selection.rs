//! Selection operators.
//!
//! Selection picks a mating pool from the scored population and pairs
//! parents from it; elitism carries the best genomes over unchanged.
//! Fitness-proportionate (roulette wheel) selection is the default.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the mating pool is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSelection {
    /// Probability proportional to fitness.
    #[default]
    RouletteWheel,
    /// Best of `size` uniformly drawn individuals.
    Tournament {
        /// Individuals competing in each tournament.
        size: usize,
    },
    /// The top individuals by fitness.
    SteadyState,
}

/// Configuration for selection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Mating pool selection method.
    pub method: ParentSelection,
}

/// Result of selection: indices into the scored population.
#[derive(Debug)]
pub struct SelectionResult {
    /// Indices of elite individuals (preserved unchanged).
    pub elite_indices: Vec<usize>,
    /// The mating pool.
    pub parents: Vec<usize>,
    /// One pair of parents per offspring to create.
    pub parent_pairs: Vec<(usize, usize)>,
}

/// Select elite individuals and parent pairs for the next generation.
///
/// The pool holds `num_parents` individuals; each pair is drawn from two
/// distinct pool slots (the same slot twice only if the pool has one entry).
#[must_use]
pub fn select_parents<R: Rng>(
    fitness: &[f64],
    config: &SelectionConfig,
    num_parents: usize,
    elite_count: usize,
    offspring: usize,
    rng: &mut R,
) -> SelectionResult {
    let pop_size = fitness.len();
    let elite_indices = select_elite(fitness, elite_count.min(pop_size));

    if pop_size == 0 || num_parents == 0 {
        return SelectionResult {
            elite_indices,
            parents: Vec::new(),
            parent_pairs: Vec::new(),
        };
    }

    let parents: Vec<usize> = match config.method {
        ParentSelection::RouletteWheel => (0..num_parents)
            .map(|_| roulette_select(fitness, rng))
            .collect(),
        ParentSelection::Tournament { size } => (0..num_parents)
            .map(|_| tournament_select(fitness, size, rng))
            .collect(),
        ParentSelection::SteadyState => {
            let mut best = select_elite(fitness, num_parents.min(pop_size));
            // Keep the requested pool size even if it exceeds the population.
            let mut i = 0;
            while best.len() < num_parents {
                best.push(best[i]);
                i += 1;
            }
            best
        }
    };

    let parent_pairs = (0..offspring)
        .map(|_| {
            let first = rng.gen_range(0..parents.len());
            let second = if parents.len() > 1 {
                let other = rng.gen_range(0..parents.len() - 1);
                if other >= first { other + 1 } else { other }
            } else {
                first
            };
            (parents[first], parents[second])
        })
        .collect();

    SelectionResult {
        elite_indices,
        parents,
        parent_pairs,
    }
}

/// Select the top N individuals by fitness, best first.
///
/// Ties keep population order.
pub(crate) fn select_elite(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = fitness.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    indexed.into_iter().take(count).map(|(i, _)| i).collect()
}

/// Roulette wheel: pick an index with probability proportional to fitness.
///
/// Falls back to a uniform pick when no individual has positive fitness.
fn roulette_select<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let total: f64 = fitness.iter().filter(|f| f.is_finite() && **f > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.gen_range(0..fitness.len());
    }

    let mut remaining = rng.gen_range(0.0..total);
    let mut last_positive = 0;
    for (i, &f) in fitness.iter().enumerate() {
        if !(f.is_finite() && f > 0.0) {
            continue;
        }
        if remaining < f {
            return i;
        }
        remaining -= f;
        last_positive = i;
    }
    // Rounding can leave a sliver past the last slot.
    last_positive
}

/// Tournament selection: randomly select k individuals and return the best.
fn tournament_select<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let pop_size = fitness.len();
    if pop_size == 0 {
        return 0;
    }

    let k = k.min(pop_size).max(1);
    let mut best_idx = rng.gen_range(0..pop_size);
    let mut best_fitness = fitness[best_idx];

    for _ in 1..k {
        let idx = rng.gen_range(0..pop_size);
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Summary statistics of a population's fitness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
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

        let sum: f64 = fitness.iter().sum();
        let mean = sum / fitness.len() as f64;

        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);

        let variance: f64 =
            fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / fitness.len() as f64;

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
    fn test_roulette_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = vec![1.0, 1.0, 8.0, 0.0];

        let mut counts = [0usize; 4];
        for _ in 0..2000 {
            counts[roulette_select(&fitness, &mut rng)] += 1;
        }

        assert_eq!(counts[3], 0, "zero fitness is never drawn");
        assert!(counts[2] > counts[0] * 4);
        assert!(counts[2] > counts[1] * 4);
    }

    #[test]
    fn test_roulette_all_zero_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(3);
        let fitness = vec![0.0; 4];
        let mut counts = [0usize; 4];
        for _ in 0..400 {
            counts[roulette_select(&fitness, &mut rng)] += 1;
        }
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_tournament_selection_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = vec![0.1, 0.5, 0.9, 0.2, 0.8];

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            let idx = tournament_select(&fitness, 3, &mut rng);
            counts[idx] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn test_elite_selection() {
        let fitness = vec![0.3, 0.9, 0.1, 0.8, 0.5];
        let elite = select_elite(&fitness, 2);
        assert_eq!(elite, vec![1, 3]);
    }

    #[test]
    fn test_select_parents_shapes() {
        let mut rng = SmallRng::seed_from_u64(123);
        let fitness = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

        let result = select_parents(&fitness, &SelectionConfig::default(), 4, 2, 8, &mut rng);

        assert_eq!(result.elite_indices, vec![9, 8]);
        assert_eq!(result.parents.len(), 4);
        assert_eq!(result.parent_pairs.len(), 8);
        for (a, b) in &result.parent_pairs {
            assert!(result.parents.contains(a));
            assert!(result.parents.contains(b));
        }
    }

    #[test]
    fn test_steady_state_pool_is_top() {
        let mut rng = SmallRng::seed_from_u64(5);
        let fitness = vec![5.0, 1.0, 3.0, 4.0];
        let config = SelectionConfig {
            method: ParentSelection::SteadyState,
        };
        let result = select_parents(&fitness, &config, 2, 0, 3, &mut rng);
        assert_eq!(result.parents, vec![0, 3]);
        for (a, b) in &result.parent_pairs {
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_selection_stats() {
        let fitness = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SelectionStats::from_fitness(&fitness);

        assert!((stats.mean_fitness - 3.0).abs() < 0.001);
        assert!((stats.best_fitness - 5.0).abs() < 0.001);
        assert!((stats.worst_fitness - 1.0).abs() < 0.001);
    }
}
