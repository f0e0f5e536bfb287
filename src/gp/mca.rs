//! Maximal canonical acceptor construction.
//!
//! The maximal canonical acceptor (MCA) is the prefix-tree acceptor of S+,
//! completed with self-loops so that its transition function is total. It
//! is the most specific hypothesis; the search only ever merges its states.

use crate::acceptor::{Acceptor, StateId, Symbol};
use crate::error::{GigError, Result};
use crate::sample::Sample;
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// A maximal canonical acceptor together with its State Index List.
#[derive(Debug, Clone)]
pub struct Mca<S> {
    acceptor: Acceptor<S>,
    /// `prefixes[q]` is the prefix of S+ that state `q` stands for.
    prefixes: Vec<Vec<S>>,
}

impl<S: Symbol> Mca<S> {
    /// Build the MCA of `positive`.
    ///
    /// The alphabet is the union of the symbols of `positive` and `alphabet`.
    /// States are numbered in first-discovery order: words are read in input
    /// order and the empty prefix is always state `0`.
    ///
    /// # Errors
    ///
    /// Returns [`GigError::EmptySample`] if `positive` is empty.
    pub fn build<I>(positive: &[Vec<S>], alphabet: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        if positive.is_empty() {
            return Err(GigError::EmptySample);
        }

        let alphabet: Vec<S> = positive
            .iter()
            .flatten()
            .cloned()
            .chain(alphabet)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let width = alphabet.len();

        let mut index: HashMap<Vec<S>, StateId> = HashMap::from([(Vec::new(), 0)]);
        let mut prefixes: Vec<Vec<S>> = vec![Vec::new()];
        let mut table: Vec<Option<StateId>> = vec![None; width];
        let mut accepting = vec![false];

        for word in positive {
            let mut state = 0;
            let mut prefix = Vec::with_capacity(word.len());
            for symbol in word {
                prefix.push(symbol.clone());
                let next = match index.get(&prefix) {
                    Some(&q) => q,
                    None => {
                        let q = prefixes.len();
                        trace!(state = q, prefix = ?prefix, "new prefix state");
                        index.insert(prefix.clone(), q);
                        prefixes.push(prefix.clone());
                        table.extend(std::iter::repeat_n(None, width));
                        accepting.push(false);
                        q
                    }
                };
                // Every symbol of `word` is in the alphabet by construction.
                let column = alphabet.binary_search(symbol).unwrap_or_default();
                table[state * width + column] = Some(next);
                state = next;
            }
            accepting[state] = true;
        }

        let transitions = table
            .iter()
            .enumerate()
            .map(|(slot, target)| target.unwrap_or(slot / width.max(1)))
            .collect();

        Ok(Self {
            acceptor: Acceptor::from_parts(alphabet, transitions, 0, accepting),
            prefixes,
        })
    }

    /// Build the MCA of the sample's S+ over the sample's full alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`GigError::EmptySample`] if the sample has no positive words.
    pub fn from_sample(sample: &Sample<S>) -> Result<Self> {
        Self::build(sample.positive(), sample.alphabet())
    }

    /// Wrap a hand-built acceptor whose states stand for `prefixes`.
    #[cfg(test)]
    pub(crate) fn from_parts(acceptor: Acceptor<S>, prefixes: Vec<Vec<S>>) -> Self {
        debug_assert_eq!(acceptor.num_states(), prefixes.len());
        Self { acceptor, prefixes }
    }

    /// The completed prefix-tree acceptor.
    #[must_use]
    pub fn acceptor(&self) -> &Acceptor<S> {
        &self.acceptor
    }

    /// The State Index List: the prefix each state index stands for.
    #[must_use]
    pub fn prefixes(&self) -> &[Vec<S>] {
        &self.prefixes
    }

    /// Number of states, which is also the genome length.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.prefixes.len()
    }

    /// State index of `prefix`, if it is a prefix of some word in S+.
    #[must_use]
    pub fn state_of(&self, prefix: &[S]) -> Option<StateId> {
        let q = self.acceptor.run(prefix)?;
        (self.prefixes[q] == prefix).then_some(q)
    }
}
