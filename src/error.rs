//! Error types for grammar induction.

use thiserror::Error;

/// Errors produced while building, reducing or evolving acceptors.
#[derive(Debug, Error)]
pub enum GigError {
    /// The positive sample contains no sequences.
    #[error("positive sample is empty: cannot build a maximal canonical acceptor")]
    EmptySample,
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A genome does not cover exactly the states of the base acceptor.
    #[error("partition has {actual} genes but the base acceptor has {expected} states")]
    InconsistentPartitionLength {
        /// Number of states in the base acceptor.
        expected: usize,
        /// Length of the offending partition.
        actual: usize,
    },
    /// A transition table is partial or references an unknown state.
    #[error("invalid acceptor: {0}")]
    InvalidAcceptor(String),
    /// Reading a sample file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A sample document could not be parsed.
    #[error("malformed sample: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GigError>;
