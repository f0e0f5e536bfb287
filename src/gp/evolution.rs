//! Main evolution loop.
//!
//! This module orchestrates the generational search: initialization,
//! parallel fitness evaluation, selection, crossover, mutation and elitism,
//! until a stopping criterion fires at a generation boundary.

// Evolution uses intentional casts and one long driver function
#![allow(clippy::cast_precision_loss, clippy::too_many_lines)]

use crate::acceptor::Symbol;
use crate::error::{GigError, Result};
use crate::gp::crossover::{CrossoverConfig, crossover};
use crate::gp::fitness::{FitnessConfig, FitnessResult, evaluate_population};
use crate::gp::mca::Mca;
use crate::gp::mutation::mutate_population;
use crate::gp::partition::Partition;
use crate::gp::population::{InitStrategy, initialize_population};
use crate::gp::selection::{ParentSelection, SelectionConfig, SelectionStats, select_parents};
use crate::sample::Sample;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Genomes per generation.
    pub population_size: usize,
    /// Maximum number of generations evaluated, the initial one included.
    pub num_generations: usize,
    /// Size of the mating pool.
    pub num_parents: usize,
    /// Best genomes copied unchanged into the next generation.
    pub elitism_count: usize,
    /// Fraction of offspring receiving one mutation, in `[0, 1]`.
    pub mutation_fraction: f64,
    /// Stop after this many consecutive generations without improvement.
    pub stop_on_saturation_after: Option<usize>,
    /// Stop once the best fitness reaches this fraction of
    /// [`FitnessConfig::max_fitness`], in `(0, 1]`.
    pub stop_on_fitness_reach: Option<f64>,
    /// Worker threads for fitness evaluation (`None`: rayon's default).
    pub parallelism: Option<usize>,
    /// RNG seed for reproducibility.
    pub seed: u64,
    /// How the first generation is seeded.
    pub init_strategy: InitStrategy,
    /// Parent selection configuration.
    pub selection: SelectionConfig,
    /// Crossover configuration.
    pub crossover: CrossoverConfig,
    /// Fitness weights.
    pub fitness: FitnessConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 2000,
            num_parents: 20,
            elitism_count: 2,
            mutation_fraction: 0.1,
            stop_on_saturation_after: Some(50),
            stop_on_fitness_reach: Some(1.0),
            parallelism: None,
            seed: 42,
            init_strategy: InitStrategy::default(),
            selection: SelectionConfig::default(),
            crossover: CrossoverConfig::default(),
            fitness: FitnessConfig::default(),
        }
    }
}

impl EvolutionConfig {
    /// Check every option before any generation runs.
    ///
    /// # Errors
    ///
    /// Returns [`GigError::InvalidConfiguration`] naming the first bad option.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GigError::InvalidConfiguration(msg));

        if self.population_size == 0 {
            return invalid("population_size must be at least 1".into());
        }
        if self.num_generations == 0 {
            return invalid("num_generations must be at least 1".into());
        }
        if self.num_parents == 0 || self.num_parents > self.population_size {
            return invalid(format!(
                "num_parents must be in 1..={} (got {})",
                self.population_size, self.num_parents
            ));
        }
        if self.elitism_count > self.population_size {
            return invalid(format!(
                "elitism_count {} exceeds population_size {}",
                self.elitism_count, self.population_size
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_fraction) {
            return invalid(format!(
                "mutation_fraction must be in [0, 1] (got {})",
                self.mutation_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover.parent_bias) {
            return invalid(format!(
                "crossover.parent_bias must be in [0, 1] (got {})",
                self.crossover.parent_bias
            ));
        }
        if let Some(reach) = self
            .stop_on_fitness_reach
            .filter(|&r| r.is_nan() || r <= 0.0 || r > 1.0)
        {
            return invalid(format!(
                "stop_on_fitness_reach is a fraction of the maximum fitness in (0, 1] (got {reach})"
            ));
        }
        if self.stop_on_saturation_after == Some(0) {
            return invalid("stop_on_saturation_after must be at least 1 generation".into());
        }
        if self.parallelism == Some(0) {
            return invalid("parallelism must be at least 1 worker".into());
        }
        if self.selection.method == (ParentSelection::Tournament { size: 0 }) {
            return invalid("tournament size must be at least 1".into());
        }
        let weights = [
            self.fitness.accuracy_weight,
            self.fitness.compactness_weight,
            self.fitness.conflict_penalty,
        ];
        if weights.iter().any(|w| !w.is_finite()) {
            return invalid("fitness weights must be finite".into());
        }
        if !self.fitness.scale.is_finite() || self.fitness.scale < 0.0 {
            return invalid(format!(
                "fitness.scale must be finite and non-negative (got {})",
                self.fitness.scale
            ));
        }
        Ok(())
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The generation limit was reached.
    MaxGenerations,
    /// The best fitness stopped improving.
    Saturated,
    /// The best fitness reached the target.
    FitnessReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxGenerations => write!(f, "generation limit reached"),
            Self::Saturated => write!(f, "fitness saturated"),
            Self::FitnessReached => write!(f, "target fitness reached"),
        }
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number, starting at 0 for the initial population.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean fitness.
    pub mean_fitness: f64,
    /// Fitness standard deviation.
    pub fitness_std: f64,
    /// Number of distinct genomes in the population.
    pub distinct_genomes: usize,
}

/// The best genome found by a run and how the run ended.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Best genome ever observed.
    pub best: Partition,
    /// Its fitness breakdown.
    pub best_result: FitnessResult,
    /// Generation in which it was first observed.
    pub generation_found: usize,
    /// Number of generations evaluated.
    pub generations_run: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Statistics per generation.
    pub history: Vec<GenerationStats>,
}

impl EvolutionOutcome {
    /// Fitness of the best genome.
    #[must_use]
    pub fn best_fitness(&self) -> f64 {
        self.best_result.fitness
    }
}

/// Run the genetic search over partitions of `mca`.
///
/// # Errors
///
/// Returns [`GigError::InvalidConfiguration`] if the configuration is
/// invalid or the worker pool cannot be started.
pub fn evolve<S: Symbol>(
    mca: &Mca<S>,
    sample: &Sample<S>,
    config: &EvolutionConfig,
) -> Result<EvolutionOutcome> {
    evolve_with(mca, sample, config, |_| {})
}

/// Run the genetic search, reporting every generation to `observer`.
///
/// Stopping criteria are checked only between generations; the evaluation
/// of a generation always completes.
///
/// # Errors
///
/// Returns [`GigError::InvalidConfiguration`] if the configuration is
/// invalid or the worker pool cannot be started.
pub fn evolve_with<S, F>(
    mca: &Mca<S>,
    sample: &Sample<S>,
    config: &EvolutionConfig,
    mut observer: F,
) -> Result<EvolutionOutcome>
where
    S: Symbol,
    F: FnMut(&GenerationStats),
{
    config.validate()?;

    let pool = match config.parallelism {
        Some(threads) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    GigError::InvalidConfiguration(format!(
                        "cannot start {threads} worker threads: {e}"
                    ))
                })?,
        ),
        None => None,
    };

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut population = initialize_population(
        mca.num_states(),
        config.population_size,
        config.init_strategy,
        &mut rng,
    );

    info!(
        states = mca.num_states(),
        population = config.population_size,
        generations = config.num_generations,
        strategy = ?config.init_strategy,
        "starting evolution"
    );

    let mut best: Option<(Partition, FitnessResult, usize)> = None;
    let mut stale_generations = 0usize;
    let mut history = Vec::new();
    let mut generation = 0usize;

    let stop_reason = loop {
        // Evaluate: every genome gets a score before the loop moves on.
        let results = match &pool {
            Some(pool) => {
                pool.install(|| evaluate_population(mca, &population, sample, &config.fitness))?
            }
            None => evaluate_population(mca, &population, sample, &config.fitness)?,
        };
        let fitness: Vec<f64> = results.iter().map(|r| r.fitness).collect();

        let stats = SelectionStats::from_fitness(&fitness);
        let gen_stats = GenerationStats {
            generation,
            best_fitness: stats.best_fitness,
            mean_fitness: stats.mean_fitness,
            fitness_std: stats.fitness_std,
            distinct_genomes: population.iter().collect::<HashSet<_>>().len(),
        };
        debug!(
            generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            std = stats.fitness_std,
            distinct = gen_stats.distinct_genomes,
            "generation evaluated"
        );
        observer(&gen_stats);
        history.push(gen_stats);

        // First genome with the highest fitness in this generation.
        let leader = results
            .iter()
            .enumerate()
            .fold(None::<(usize, &FitnessResult)>, |acc, (i, r)| match acc {
                Some((_, b)) if b.fitness >= r.fitness => acc,
                _ => Some((i, r)),
            });
        if let Some((idx, result)) = leader {
            let improved = best
                .as_ref()
                .is_none_or(|(_, current, _)| result.fitness > current.fitness);
            if improved {
                best = Some((population[idx].clone(), *result, generation));
                stale_generations = 0;
            } else {
                stale_generations += 1;
            }
        }
        generation += 1;

        let best_fitness = best.as_ref().map_or(0.0, |(_, r, _)| r.fitness);
        if config
            .stop_on_fitness_reach
            .is_some_and(|reach| best_fitness >= reach * config.fitness.max_fitness())
        {
            break StopReason::FitnessReached;
        }
        if config
            .stop_on_saturation_after
            .is_some_and(|window| stale_generations >= window)
        {
            break StopReason::Saturated;
        }
        if generation >= config.num_generations {
            break StopReason::MaxGenerations;
        }

        // Reproduce: elites first, then mutated crossover offspring.
        let elite_count = config.elitism_count.min(population.len());
        let selection = select_parents(
            &fitness,
            &config.selection,
            config.num_parents,
            elite_count,
            config.population_size - elite_count,
            &mut rng,
        );

        let mut offspring: Vec<Partition> = selection
            .parent_pairs
            .iter()
            .map(|&(a, b)| crossover(&population[a], &population[b], &config.crossover, &mut rng))
            .collect();
        mutate_population(&mut offspring, config.mutation_fraction, &mut rng);

        let mut next_population = Vec::with_capacity(config.population_size);
        next_population.extend(
            selection
                .elite_indices
                .iter()
                .map(|&i| population[i].clone()),
        );
        next_population.extend(offspring);
        population = next_population;
    };

    let (best, best_result, generation_found) = best.ok_or_else(|| {
        GigError::InvalidConfiguration("population produced no genomes".into())
    })?;

    info!(
        reason = %stop_reason,
        best_fitness = best_result.fitness,
        accuracy = best_result.accuracy,
        groups = best.group_count(),
        generation_found,
        generations_run = generation,
        "evolution finished"
    );

    Ok(EvolutionOutcome {
        best,
        best_result,
        generation_found,
        generations_run: generation,
        stop_reason,
        history,
    })
}
