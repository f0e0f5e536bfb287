//! CLI command implementations for Gig.

pub(crate) mod learn;
pub(crate) mod mca;

mod output;

use clap::ValueEnum;
use gig::GigError;
use gig::gp::{InitStrategy, ParentSelection};
use std::error::Error;
use std::fmt;

/// Output format for `learn` and `mca`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Initial population strategy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum InitArg {
    /// Uniformly random genomes.
    Random,
    /// Identity genome, single-pair merges, then random genomes.
    Structured,
}

impl From<InitArg> for InitStrategy {
    fn from(arg: InitArg) -> Self {
        match arg {
            InitArg::Random => Self::Random,
            InitArg::Structured => Self::Structured,
        }
    }
}

/// Parent selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SelectionArg {
    /// Fitness-proportionate selection.
    Roulette,
    /// Best of a random tournament.
    Tournament,
    /// The fittest genomes.
    SteadyState,
}

impl SelectionArg {
    /// Selection method, with the tournament size if one is needed.
    pub(crate) fn method(self, tournament_size: usize) -> ParentSelection {
        match self {
            Self::Roulette => ParentSelection::RouletteWheel,
            Self::Tournament => ParentSelection::Tournament {
                size: tournament_size,
            },
            Self::SteadyState => ParentSelection::SteadyState,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<GigError> for CliError {
    fn from(e: GigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}
