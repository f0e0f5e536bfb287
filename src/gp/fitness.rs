//! Fitness evaluation for partition genomes.
//!
//! A genome is scored by reducing the MCA with it and classifying the
//! sample: the accuracy term rewards consistency with S+/S-, the
//! compactness term rewards genomes whose largest group covers many states.
//! Evaluation is a pure function of its inputs, so populations are scored
//! in parallel.

// Fitness uses intentional casts for ratios
#![allow(clippy::cast_precision_loss)]

use crate::acceptor::{Acceptor, Symbol};
use crate::error::Result;
use crate::gp::mca::Mca;
use crate::gp::partition::Partition;
use crate::gp::reduce::reduce;
use crate::sample::Sample;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Weights of the fitness terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Weight of classification accuracy.
    pub accuracy_weight: f64,
    /// Weight of the largest-group ratio.
    pub compactness_weight: f64,
    /// Constant multiplier spreading scores apart for selection.
    pub scale: f64,
    /// Penalty per merge conflict, relative to the reduced transition count.
    pub conflict_penalty: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            accuracy_weight: 3.0,
            compactness_weight: 1.0,
            scale: 1000.0,
            conflict_penalty: 0.0,
        }
    }
}

impl FitnessConfig {
    /// Highest score a genome can reach under this configuration.
    #[must_use]
    pub fn max_fitness(&self) -> f64 {
        (self.accuracy_weight + self.compactness_weight) * self.scale
    }
}

/// Breakdown of a genome's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitnessResult {
    /// Fraction of the sample classified correctly, in `[0, 1]`.
    pub accuracy: f64,
    /// Largest group size over genome length, in `[0, 1]`.
    pub compactness: f64,
    /// Number of transitions overwritten during reduction.
    pub conflicts: usize,
    /// Combined, scaled score.
    pub fitness: f64,
}

/// Fraction of S+ accepted plus S- rejected, over the sample size.
///
/// An empty sample is vacuously classified correctly.
#[must_use]
pub fn accuracy<S: Symbol>(acceptor: &Acceptor<S>, sample: &Sample<S>) -> f64 {
    if sample.is_empty() {
        return 1.0;
    }
    let accepted = sample
        .positive()
        .iter()
        .filter(|w| acceptor.accepts(w))
        .count();
    let rejected = sample
        .negative()
        .iter()
        .filter(|w| !acceptor.accepts(w))
        .count();
    (accepted + rejected) as f64 / sample.len() as f64
}

/// Size of the largest group over the number of genes.
#[must_use]
pub fn compactness(partition: &Partition) -> f64 {
    if partition.is_empty() {
        return 0.0;
    }
    partition.max_group_size() as f64 / partition.len() as f64
}

/// Score one genome.
///
/// # Errors
///
/// Returns [`crate::GigError::InconsistentPartitionLength`] if the genome
/// does not match the MCA.
pub fn evaluate_fitness<S: Symbol>(
    mca: &Mca<S>,
    partition: &Partition,
    sample: &Sample<S>,
    config: &FitnessConfig,
) -> Result<FitnessResult> {
    let reduction = reduce(mca, partition)?;
    let accuracy = accuracy(&reduction.acceptor, sample);
    let compactness = compactness(partition);
    let conflicts = reduction.conflicts.len();

    let transitions = reduction.acceptor.num_states() * reduction.acceptor.alphabet().len();
    let conflict_ratio = if transitions == 0 {
        0.0
    } else {
        conflicts as f64 / transitions as f64
    };

    let raw = config.accuracy_weight * accuracy + config.compactness_weight * compactness
        - config.conflict_penalty * conflict_ratio;

    Ok(FitnessResult {
        accuracy,
        compactness,
        conflicts,
        fitness: (raw * config.scale).max(0.0),
    })
}

/// Score every genome of a population in parallel.
///
/// Results are returned in population order.
///
/// # Errors
///
/// Returns the first length mismatch encountered.
pub fn evaluate_population<S: Symbol>(
    mca: &Mca<S>,
    population: &[Partition],
    sample: &Sample<S>,
    config: &FitnessConfig,
) -> Result<Vec<FitnessResult>> {
    population
        .par_iter()
        .map(|genome| evaluate_fitness(mca, genome, sample, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> (Mca<char>, Sample<char>) {
        let sample = Sample::from_strs(&["a", "aa"], &["", "b"]);
        let mca = Mca::from_sample(&sample).unwrap();
        (mca, sample)
    }

    #[test]
    fn test_identity_classifies_sample() {
        let (mca, sample) = scenario();
        let result = evaluate_fitness(
            &mca,
            &Partition::identity(mca.num_states()),
            &sample,
            &FitnessConfig::default(),
        )
        .unwrap();
        assert!((result.accuracy - 1.0).abs() < 1e-12);
        assert!((result.compactness - 1.0 / 3.0).abs() < 1e-12);
        assert!((result.fitness - (3.0 + 1.0 / 3.0) * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_group_accepts_everything() {
        let sample = Sample::from_strs(&["a", "aa"], &["b", "ab"]);
        let mca = Mca::from_sample(&sample).unwrap();
        let result = evaluate_fitness(
            &mca,
            &Partition::single_group(mca.num_states()),
            &sample,
            &FitnessConfig::default(),
        )
        .unwrap();
        assert!((result.accuracy - 0.5).abs() < 1e-12);
        assert!((result.compactness - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_conflict_penalty_lowers_score() {
        let sample = Sample::from_strs(&["a", "b"], &[]);
        let mca = Mca::from_sample(&sample).unwrap();
        let genome = Partition::new(&[0, 1, 0]);
        let plain = evaluate_fitness(&mca, &genome, &sample, &FitnessConfig::default()).unwrap();
        let penalized = evaluate_fitness(
            &mca,
            &genome,
            &sample,
            &FitnessConfig {
                conflict_penalty: 1.0,
                ..FitnessConfig::default()
            },
        )
        .unwrap();
        assert_eq!(plain.conflicts, 1);
        assert!(penalized.fitness < plain.fitness);
    }

    #[test]
    fn test_population_order_preserved() {
        let (mca, sample) = scenario();
        let population = vec![
            Partition::single_group(3),
            Partition::identity(3),
            Partition::new(&[0, 1, 1]),
        ];
        let config = FitnessConfig::default();
        let scores = evaluate_population(&mca, &population, &sample, &config).unwrap();
        for (genome, score) in population.iter().zip(&scores) {
            let single = evaluate_fitness(&mca, genome, &sample, &config).unwrap();
            assert_eq!(*score, single);
        }
    }

    #[test]
    fn test_population_length_mismatch() {
        let (mca, sample) = scenario();
        let population = vec![Partition::identity(2)];
        assert!(evaluate_population(&mca, &population, &sample, &FitnessConfig::default()).is_err());
    }

    #[test]
    fn test_max_fitness() {
        assert!((FitnessConfig::default().max_fitness() - 4000.0).abs() < 1e-9);
    }
}
