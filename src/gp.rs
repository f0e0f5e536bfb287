//! Genetic grammar induction.
//!
//! This module evolves partitions of the maximal canonical acceptor (MCA)
//! of S+ towards a small acceptor consistent with S+ and S-. A genome
//! merges MCA states; its fitness is the accuracy of the merged acceptor on
//! the sample plus a bonus for large groups.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │   Fitness Evaluation (parallel)     │
//! ├─────────────────────────────────────┤
//! │  Reducer │ Partition canonical form │
//! ├─────────────────────────────────────┤
//! │   Maximal Canonical Acceptor (S+)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use gig::Sample;
//! use gig::gp::{EvolutionConfig, Learner};
//!
//! let sample = Sample::from_strs(&["a", "aa", "aaa"], &["", "b", "ab"]);
//! let config = EvolutionConfig {
//!     population_size: 20,
//!     num_parents: 6,
//!     num_generations: 20,
//!     ..EvolutionConfig::default()
//! };
//! let outcome = Learner::new(config).learn(&sample)?;
//! assert!(outcome.acceptor.is_total());
//! # Ok::<(), gig::GigError>(())
//! ```

mod crossover;
mod evolution;
mod fitness;
mod learner;
mod mca;
mod mutation;
mod partition;
mod population;
mod reduce;
mod selection;

pub use crossover::{CrossoverConfig, crossover};
pub use evolution::{
    EvolutionConfig, EvolutionOutcome, GenerationStats, StopReason, evolve, evolve_with,
};
pub use fitness::{
    FitnessConfig, FitnessResult, accuracy, compactness, evaluate_fitness, evaluate_population,
};
pub use learner::{LearnOutcome, Learner};
pub use mca::Mca;
pub use mutation::{mutate, mutate_population, mutation_count};
pub use partition::{Partition, canonicalize, equals_canonical, is_canonical};
pub use population::{InitStrategy, initialize_population, random_genome};
pub use reduce::{Conflict, Reduction, reduce};
pub use selection::{
    ParentSelection, SelectionConfig, SelectionResult, SelectionStats, select_parents,
};
