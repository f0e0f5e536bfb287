//! End-to-end learning scenarios.
//!
//! These tests run the whole pipeline (sample, MCA, evolution, reduction)
//! on small samples where the best merge is known, and check the
//! guarantees the search gives: elitism, reproducibility and early errors.
//!
//! Run with: cargo test --release learning_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use gig::gp::{
    EvolutionConfig, InitStrategy, Learner, Mca, Partition, StopReason, evaluate_fitness, evolve,
    reduce,
};
use gig::{GigError, Sample};
use std::io::Write;

fn small_config() -> EvolutionConfig {
    EvolutionConfig {
        population_size: 16,
        num_generations: 12,
        num_parents: 6,
        stop_on_saturation_after: None,
        stop_on_fitness_reach: None,
        ..EvolutionConfig::default()
    }
}

fn a_plus() -> Sample<char> {
    Sample::from_strs(&["a", "aa"], &["", "b"])
}

#[test]
fn test_identity_classifies_sample() {
    let sample = a_plus();
    let mca = Mca::from_sample(&sample).unwrap();
    assert_eq!(mca.num_states(), 3);

    let identity = reduce(&mca, &Partition::identity(3)).unwrap();
    assert!(identity.conflicts.is_empty());
    assert!(identity.acceptor.accepts(&['a']));
    assert!(identity.acceptor.accepts(&['a', 'a']));
    assert!(!identity.acceptor.accepts(&[]));
    assert!(!identity.acceptor.accepts(&['b']));

    let config = EvolutionConfig::default().fitness;
    let result = evaluate_fitness(&mca, &Partition::identity(3), &sample, &config).unwrap();
    assert!((result.accuracy - 1.0).abs() < 1e-9);
}

#[test]
fn test_single_group_scores_below_identity() {
    let sample = a_plus();
    let mca = Mca::from_sample(&sample).unwrap();
    let config = EvolutionConfig::default().fitness;

    let identity = evaluate_fitness(&mca, &Partition::identity(3), &sample, &config).unwrap();
    let single = evaluate_fitness(&mca, &Partition::single_group(3), &sample, &config).unwrap();

    // One accepting state accepts "" and "b".
    assert!((single.accuracy - 0.5).abs() < 1e-9);
    assert!(single.fitness < identity.fitness);
}

#[test]
fn test_learner_finds_a_loop() {
    let outcome = Learner::new(small_config()).learn(&a_plus()).unwrap();

    // Merging "a" with "aa" is the only consistent two-state acceptor.
    assert_eq!(outcome.partition.genes(), &[0, 1, 1]);
    assert_eq!(outcome.acceptor.num_states(), 2);
    assert!((outcome.accuracy - 1.0).abs() < 1e-9);
    assert!(outcome.acceptor.accepts(&['a', 'a', 'a', 'a']));
    assert!(!outcome.acceptor.accepts(&['b']));
    assert_eq!(outcome.conflicts, 0);
    assert_eq!(outcome.stop_reason, StopReason::MaxGenerations);
    assert_eq!(outcome.generations_run, 12);
}

#[test]
fn test_elitism_keeps_best_fitness() {
    let sample = Sample::from_strs(
        &["ab", "abab", "ababab", "aab"],
        &["", "a", "b", "ba", "abb", "bab"],
    );
    let mca = Mca::from_sample(&sample).unwrap();
    let config = EvolutionConfig {
        population_size: 24,
        num_generations: 25,
        num_parents: 8,
        elitism_count: 1,
        mutation_fraction: 0.5,
        init_strategy: InitStrategy::Random,
        ..small_config()
    };

    let outcome = evolve(&mca, &sample, &config).unwrap();
    for pair in outcome.history.windows(2) {
        assert!(
            pair[1].best_fitness >= pair[0].best_fitness,
            "generation {} lost the elite",
            pair[1].generation
        );
    }
    let last = outcome.history.last().unwrap();
    assert!((last.best_fitness - outcome.best_fitness()).abs() < 1e-9);
}

#[test]
fn test_same_seed_same_run() {
    let sample = Sample::from_strs(&["ab", "abab", "b"], &["a", "ba", "aa"]);
    let config = EvolutionConfig {
        seed: 7,
        ..small_config()
    };

    let first = Learner::new(config).learn(&sample).unwrap();
    let second = Learner::new(config).learn(&sample).unwrap();
    assert_eq!(first.partition, second.partition);
    assert_eq!(first.history, second.history);
}

#[test]
fn test_thread_count_does_not_change_result() {
    let sample = Sample::from_strs(&["ab", "abab", "b"], &["a", "ba", "aa"]);
    let single = EvolutionConfig {
        parallelism: Some(1),
        ..small_config()
    };
    let many = EvolutionConfig {
        parallelism: Some(4),
        ..small_config()
    };

    let a = Learner::new(single).learn(&sample).unwrap();
    let b = Learner::new(many).learn(&sample).unwrap();
    assert_eq!(a.partition, b.partition);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_invalid_config_is_rejected() {
    let too_many_parents = EvolutionConfig {
        population_size: 4,
        num_parents: 5,
        ..EvolutionConfig::default()
    };
    assert!(matches!(
        Learner::new(too_many_parents).learn(&a_plus()),
        Err(GigError::InvalidConfiguration(_))
    ));

    let bad_fraction = EvolutionConfig {
        mutation_fraction: 1.5,
        ..EvolutionConfig::default()
    };
    assert!(matches!(
        Learner::new(bad_fraction).learn(&a_plus()),
        Err(GigError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_learn_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"positive": ["a", "aa"], "negative": ["", "b"]}}"#).unwrap();

    let sample = Sample::from_json_file(file.path()).unwrap();
    assert_eq!(sample.positive().len(), 2);
    assert_eq!(sample.negative().len(), 2);

    let outcome = Learner::new(small_config()).learn(&sample).unwrap();
    assert!((outcome.accuracy - 1.0).abs() < 1e-9);
}

#[test]
fn test_malformed_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"positive": "a"}}"#).unwrap();
    assert!(matches!(
        Sample::from_json_file(file.path()),
        Err(GigError::Json(_))
    ));
}

fn three_by_three() -> Sample<char> {
    Sample::from_strs(&["a", "aa", "aaa"], &["", "b", "ab"])
}

#[test]
fn test_fitness_scale_does_not_change_the_run() {
    let sample = three_by_three();
    let base = EvolutionConfig {
        population_size: 20,
        ..EvolutionConfig::default()
    };
    let mut doubled = base;
    doubled.fitness.scale = 2000.0;

    let a = Learner::new(base).learn(&sample).unwrap();
    let b = Learner::new(doubled).learn(&sample).unwrap();

    // Doubling the scale doubles every score exactly, so every decision repeats.
    assert_ne!(b.generations_run, 1, "scaled run stopped on its first generation");
    assert_eq!(a.partition, b.partition);
    assert_eq!(a.stop_reason, b.stop_reason);
    assert_eq!(a.generation_found, b.generation_found);
    assert_eq!(a.generations_run, b.generations_run);
    assert!((b.best_fitness - 2.0 * a.best_fitness).abs() < 1e-9);
    assert!((a.accuracy - b.accuracy).abs() < 1e-12);
}

#[test]
fn test_structured_start_converges_no_later_than_random() {
    let sample = three_by_three();
    let run = |init_strategy| {
        let config = EvolutionConfig {
            population_size: 20,
            num_generations: 50,
            seed: 42,
            init_strategy,
            ..EvolutionConfig::default()
        };
        Learner::new(config).learn(&sample).unwrap()
    };

    let structured = run(InitStrategy::Structured);
    let random = run(InitStrategy::Random);

    // The structured start already holds the identity and every single merge.
    let mca = Mca::from_sample(&sample).unwrap();
    let fitness = EvolutionConfig::default().fitness;
    let identity = evaluate_fitness(&mca, &Partition::identity(mca.num_states()), &sample, &fitness)
        .unwrap()
        .fitness;
    assert!(structured.history[0].best_fitness >= identity);

    assert!(
        structured.generation_found <= random.generation_found,
        "structured found its best at {}, random at {}",
        structured.generation_found,
        random.generation_found
    );
    assert!((structured.best_fitness - random.best_fitness).abs() < 1e-9);
}

#[test]
fn test_zero_saturation_window_is_rejected() {
    let config = EvolutionConfig {
        stop_on_saturation_after: Some(0),
        ..small_config()
    };
    assert!(matches!(
        Learner::new(config).learn(&a_plus()),
        Err(GigError::InvalidConfiguration(_))
    ));
}
