//! Labeled samples of accepted (S+) and rejected (S-) words.

use crate::acceptor::Symbol;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A finite labeled sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample<S> {
    positive: Vec<Vec<S>>,
    negative: Vec<Vec<S>>,
}

/// On-disk form of a character sample: each string is one word.
#[derive(Debug, Deserialize)]
struct SampleDocument {
    positive: Vec<String>,
    #[serde(default)]
    negative: Vec<String>,
}

impl<S: Symbol> Sample<S> {
    /// Create a sample from positive and negative words.
    #[must_use]
    pub fn new(positive: Vec<Vec<S>>, negative: Vec<Vec<S>>) -> Self {
        Self { positive, negative }
    }

    /// Words that must be accepted.
    #[must_use]
    pub fn positive(&self) -> &[Vec<S>] {
        &self.positive
    }

    /// Words that must be rejected.
    #[must_use]
    pub fn negative(&self) -> &[Vec<S>] {
        &self.negative
    }

    /// Total number of labeled words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Whether the sample holds no words at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted set of every symbol occurring in S+ or S-.
    #[must_use]
    pub fn alphabet(&self) -> Vec<S> {
        self.positive
            .iter()
            .chain(&self.negative)
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Length of the longest word in the sample, `0` if there is none.
    #[must_use]
    pub fn max_word_len(&self) -> usize {
        self.positive
            .iter()
            .chain(&self.negative)
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

impl Sample<char> {
    /// Build a character sample from string slices.
    #[must_use]
    pub fn from_strs(positive: &[&str], negative: &[&str]) -> Self {
        Self::new(
            positive.iter().map(|w| w.chars().collect()).collect(),
            negative.iter().map(|w| w.chars().collect()).collect(),
        )
    }

    /// Parse a JSON document `{"positive": [...], "negative": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GigError::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: SampleDocument = serde_json::from_str(json)?;
        Ok(Self::new(
            doc.positive.iter().map(|w| w.chars().collect()).collect(),
            doc.negative.iter().map(|w| w.chars().collect()).collect(),
        ))
    }

    /// Read and parse a JSON sample file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
