//! End-to-end learning: sample in, reduced acceptor out.

use crate::acceptor::{Acceptor, Symbol};
use crate::error::Result;
use crate::gp::evolution::{EvolutionConfig, GenerationStats, StopReason, evolve_with};
use crate::gp::mca::Mca;
use crate::gp::partition::Partition;
use crate::gp::reduce::reduce;
use crate::sample::Sample;

/// A learned acceptor with the diagnostics of the run that produced it.
#[derive(Debug, Clone)]
pub struct LearnOutcome<S> {
    /// The reduced acceptor of the best genome.
    pub acceptor: Acceptor<S>,
    /// The maximal canonical acceptor the search started from.
    pub mca: Mca<S>,
    /// The best genome.
    pub partition: Partition,
    /// Fitness of the best genome.
    pub best_fitness: f64,
    /// Accuracy of the learned acceptor on the training sample.
    pub accuracy: f64,
    /// Merge conflicts resolved while reducing the best genome.
    pub conflicts: usize,
    /// Generation in which the best genome was first observed.
    pub generation_found: usize,
    /// Number of generations evaluated.
    pub generations_run: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Statistics per generation.
    pub history: Vec<GenerationStats>,
}

/// Genetic grammar inference with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Learner {
    config: EvolutionConfig,
}

impl Learner {
    /// Create a learner.
    #[must_use]
    pub fn new(config: EvolutionConfig) -> Self {
        Self { config }
    }

    /// Learn an acceptor consistent with `sample`, as far as the search gets.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported first, then an empty S+.
    pub fn learn<S: Symbol>(&self, sample: &Sample<S>) -> Result<LearnOutcome<S>> {
        self.learn_with(sample, |_| {})
    }

    /// Like [`Learner::learn`], reporting every generation to `observer`.
    ///
    /// # Errors
    ///
    /// Configuration errors are reported first, then an empty S+.
    pub fn learn_with<S, F>(&self, sample: &Sample<S>, observer: F) -> Result<LearnOutcome<S>>
    where
        S: Symbol,
        F: FnMut(&GenerationStats),
    {
        self.config.validate()?;
        let mca = Mca::from_sample(sample)?;
        let outcome = evolve_with(&mca, sample, &self.config, observer)?;
        let reduction = reduce(&mca, &outcome.best)?;

        Ok(LearnOutcome {
            acceptor: reduction.acceptor,
            best_fitness: outcome.best_result.fitness,
            accuracy: outcome.best_result.accuracy,
            conflicts: reduction.conflicts.len(),
            generation_found: outcome.generation_found,
            generations_run: outcome.generations_run,
            stop_reason: outcome.stop_reason,
            history: outcome.history,
            partition: outcome.best,
            mca,
        })
    }
}
