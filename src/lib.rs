// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gig: genetic induction of deterministic finite acceptors.
//!
//! Given a labeled sample of accepted (S+) and rejected (S-) words, this
//! crate searches for a small deterministic acceptor consistent with it:
//! - the maximal canonical acceptor of S+ is the starting hypothesis,
//! - genomes encode which of its states to merge, in canonical form,
//! - a genetic search scores merges by accuracy and compactness.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Learner (gp::Learner)           │
//! ├─────────────────────────────────────┤
//! │     Genetic engine (gp)             │
//! ├─────────────────────────────────────┤
//! │  Acceptor model │ Labeled samples   │
//! └─────────────────────────────────────┘
//! ```

pub mod acceptor;
pub mod error;
pub mod gp;
pub mod sample;

pub use acceptor::{Acceptor, StateId, Symbol};
pub use error::{GigError, Result};
pub use sample::Sample;
