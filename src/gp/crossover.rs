//! Gene-wise crossover for partition genomes.
//!
//! Each gene of the child is copied from one of the two parents. The raw
//! group values are relabeled through a scratch map as they are first seen,
//! then the child is canonicalized so offspring are always comparable.

use crate::gp::partition::Partition;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for crossover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Probability of taking each gene from the first parent.
    pub parent_bias: f64,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self { parent_bias: 0.5 }
    }
}

/// Combine two parents gene by gene.
///
/// Both parents must cover the same MCA; in release builds a longer parent's
/// extra genes are ignored. A `parent_bias` outside `[0, 1]` is clamped.
#[must_use]
pub fn crossover<R: Rng>(
    parent1: &Partition,
    parent2: &Partition,
    config: &CrossoverConfig,
    rng: &mut R,
) -> Partition {
    debug_assert_eq!(parent1.len(), parent2.len(), "parents of different MCAs");
    let bias = if config.parent_bias.is_nan() {
        CrossoverConfig::default().parent_bias
    } else {
        config.parent_bias.clamp(0.0, 1.0)
    };

    // Fresh ids start at 1; canonicalization below brings them back to 0.
    let mut relabel: BTreeMap<usize, usize> = BTreeMap::new();
    let mut next_group = 1;
    let child: Vec<usize> = parent1
        .genes()
        .iter()
        .zip(parent2.genes())
        .map(|(&a, &b)| {
            let group = if rng.gen_bool(bias) { a } else { b };
            *relabel.entry(group).or_insert_with(|| {
                let id = next_group;
                next_group += 1;
                id
            })
        })
        .collect();

    Partition::new(&child)
}
