//! Output formatting utilities for CLI.

use gig::gp::{LearnOutcome, Mca, StopReason};
use gig::{Acceptor, Sample};
use serde::Serialize;

/// JSON-serializable learning result.
#[derive(Debug, Serialize)]
pub(super) struct JsonLearnResult<'a> {
    /// The learned acceptor.
    pub(super) acceptor: &'a Acceptor<char>,
    /// Best genome over the MCA's states.
    pub(super) partition: &'a [usize],
    /// Fitness of the best genome.
    pub(super) best_fitness: f64,
    /// Accuracy on the training sample.
    pub(super) accuracy: f64,
    /// Merge conflicts in the reduction.
    pub(super) conflicts: usize,
    /// Generation where the best genome first appeared.
    pub(super) generation_found: usize,
    /// Generations evaluated.
    pub(super) generations_run: usize,
    /// Why the run stopped.
    pub(super) stop_reason: StopReason,
    /// States of the starting MCA.
    pub(super) mca_states: usize,
}

impl<'a> JsonLearnResult<'a> {
    /// Create from a learning outcome.
    pub(super) fn from_outcome(outcome: &'a LearnOutcome<char>) -> Self {
        Self {
            acceptor: &outcome.acceptor,
            partition: outcome.partition.genes(),
            best_fitness: outcome.best_fitness,
            accuracy: outcome.accuracy,
            conflicts: outcome.conflicts,
            generation_found: outcome.generation_found,
            generations_run: outcome.generations_run,
            stop_reason: outcome.stop_reason,
            mca_states: outcome.mca.num_states(),
        }
    }
}

/// JSON-serializable maximal canonical acceptor.
#[derive(Debug, Serialize)]
pub(super) struct JsonMca<'a> {
    /// The completed prefix-tree acceptor.
    pub(super) acceptor: &'a Acceptor<char>,
    /// Prefix of each state, in state index order.
    pub(super) prefixes: Vec<String>,
}

impl<'a> JsonMca<'a> {
    /// Create from an MCA.
    pub(super) fn from_mca(mca: &'a Mca<char>) -> Self {
        Self {
            acceptor: mca.acceptor(),
            prefixes: mca.prefixes().iter().map(|p| p.iter().collect()).collect(),
        }
    }
}

/// Render a word, using `ε` for the empty word.
fn word(symbols: &[char]) -> String {
    if symbols.is_empty() {
        "ε".to_string()
    } else {
        symbols.iter().collect()
    }
}

/// One-line summary of a sample.
fn sample_summary(sample: &Sample<char>) -> String {
    format!(
        "  Sample: {} positive, {} negative, alphabet {{{}}}, longest word {}\n",
        sample.positive().len(),
        sample.negative().len(),
        sample.alphabet().iter().collect::<String>(),
        sample.max_word_len()
    )
}

/// Format a learning outcome as human-readable text.
pub(super) fn format_learn_text(outcome: &LearnOutcome<char>, sample: &Sample<char>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Learned acceptor ({})\n", outcome.stop_reason));
    output.push_str(&sample_summary(sample));
    output.push_str(&format!(
        "  States: {} (from {} MCA states)\n",
        outcome.acceptor.num_states(),
        outcome.mca.num_states()
    ));
    output.push_str(&format!("  Best fitness: {:.4}\n", outcome.best_fitness));
    output.push_str(&format!(
        "  Accuracy: {:.2}% on {} words\n",
        outcome.accuracy * 100.0,
        sample.len()
    ));
    output.push_str(&format!("  Merge conflicts: {}\n", outcome.conflicts));
    output.push_str(&format!(
        "  Found in generation {} of {}\n",
        outcome.generation_found, outcome.generations_run
    ));

    let misclassified: Vec<String> = sample
        .positive()
        .iter()
        .filter(|w| !outcome.acceptor.accepts(w))
        .map(|w| format!("+{}", word(w)))
        .chain(
            sample
                .negative()
                .iter()
                .filter(|w| outcome.acceptor.accepts(w))
                .map(|w| format!("-{}", word(w))),
        )
        .collect();
    if !misclassified.is_empty() {
        output.push_str(&format!("  Misclassified: {}\n", misclassified.join(" ")));
    }

    output.push('\n');
    output.push_str(&outcome.acceptor.to_string());
    output
}

/// Format an MCA and its State Index List as human-readable text.
pub(super) fn format_mca_text(mca: &Mca<char>, sample: &Sample<char>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Maximal canonical acceptor: {} states\n",
        mca.num_states()
    ));
    output.push_str(&sample_summary(sample));
    for (state, prefix) in mca.prefixes().iter().enumerate() {
        output.push_str(&format!("  {state:>4}  {}\n", word(prefix)));
    }
    output.push('\n');
    output.push_str(&mca.acceptor().to_string());
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_renders_empty() {
        assert_eq!(word(&[]), "ε");
        assert_eq!(word(&['a', 'b']), "ab");
    }

    #[test]
    fn test_mca_text_lists_prefixes() {
        let sample = Sample::from_strs(&["ab", "a"], &["b"]);
        let mca = Mca::from_sample(&sample).unwrap_or_else(|e| panic!("{e}"));
        let text = format_mca_text(&mca, &sample);

        assert!(text.starts_with("Maximal canonical acceptor: 3 states\n"));
        assert!(text.contains("  Sample: 2 positive, 1 negative, alphabet {ab}, longest word 2\n"));
        assert!(text.contains("     0  ε\n"));
        assert!(text.contains("     2  ab\n"));
    }
}
