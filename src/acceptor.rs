//! Deterministic finite acceptors over a fixed alphabet.
//!
//! An [`Acceptor`] is an immutable value: states are dense indices
//! `0..num_states`, the alphabet is sorted and deduplicated, and the
//! transition function is total. Producers (the maximal canonical builder
//! and the reducer) always create fresh acceptors.

use crate::error::{GigError, Result};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

/// Identifier of a state inside an [`Acceptor`].
pub type StateId = usize;

/// An opaque, comparable input token.
pub trait Symbol: Clone + Ord + Hash + fmt::Debug + Send + Sync {}

impl<T: Clone + Ord + Hash + fmt::Debug + Send + Sync> Symbol for T {}

/// A deterministic, complete finite acceptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acceptor<S> {
    alphabet: Vec<S>,
    /// Row-major `num_states × alphabet.len()` successor table.
    transitions: Vec<StateId>,
    initial: StateId,
    accepting: Vec<bool>,
}

impl<S: Symbol> Acceptor<S> {
    /// Create an acceptor from a per-state successor table.
    ///
    /// `table[q][i]` is the successor of state `q` on `alphabet[i]`. The
    /// alphabet must be strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`GigError::InvalidAcceptor`] if the table is partial, a
    /// successor is out of range, the initial state does not exist, or the
    /// alphabet is unsorted.
    pub fn new(
        alphabet: Vec<S>,
        table: Vec<Vec<StateId>>,
        initial: StateId,
        accepting: Vec<bool>,
    ) -> Result<Self> {
        let num_states = table.len();
        if num_states == 0 {
            return Err(GigError::InvalidAcceptor("no states".into()));
        }
        if !alphabet.windows(2).all(|w| w[0] < w[1]) {
            return Err(GigError::InvalidAcceptor(
                "alphabet must be sorted and free of duplicates".into(),
            ));
        }
        if initial >= num_states {
            return Err(GigError::InvalidAcceptor(format!(
                "initial state {initial} out of range (have {num_states} states)"
            )));
        }
        if accepting.len() != num_states {
            return Err(GigError::InvalidAcceptor(format!(
                "accepting flags cover {} states, expected {num_states}",
                accepting.len()
            )));
        }

        let mut transitions = Vec::with_capacity(num_states * alphabet.len());
        for (state, row) in table.into_iter().enumerate() {
            if row.len() != alphabet.len() {
                return Err(GigError::InvalidAcceptor(format!(
                    "state {state} defines {} transitions, alphabet has {} symbols",
                    row.len(),
                    alphabet.len()
                )));
            }
            if let Some(&bad) = row.iter().find(|&&t| t >= num_states) {
                return Err(GigError::InvalidAcceptor(format!(
                    "state {state} has a transition to unknown state {bad}"
                )));
            }
            transitions.extend(row);
        }

        Ok(Self {
            alphabet,
            transitions,
            initial,
            accepting,
        })
    }

    /// Assemble an acceptor from already-validated parts.
    pub(crate) fn from_parts(
        alphabet: Vec<S>,
        transitions: Vec<StateId>,
        initial: StateId,
        accepting: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(transitions.len(), accepting.len() * alphabet.len());
        debug_assert!(initial < accepting.len());
        Self {
            alphabet,
            transitions,
            initial,
            accepting,
        }
    }

    /// Number of states.
    #[must_use]
    pub fn num_states(&self) -> usize {
        self.accepting.len()
    }

    /// The sorted input alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    /// The initial state.
    #[must_use]
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Whether `state` is accepting. Unknown states are not.
    #[must_use]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.get(state).copied().unwrap_or(false)
    }

    /// All accepting states in increasing order.
    #[must_use]
    pub fn accepting_states(&self) -> Vec<StateId> {
        self.accepting
            .iter()
            .enumerate()
            .filter_map(|(q, &acc)| acc.then_some(q))
            .collect()
    }

    /// Position of `symbol` in the alphabet.
    #[must_use]
    pub fn symbol_index(&self, symbol: &S) -> Option<usize> {
        self.alphabet.binary_search(symbol).ok()
    }

    /// Successor by alphabet position.
    #[must_use]
    pub(crate) fn successor_by_index(&self, state: StateId, symbol_index: usize) -> StateId {
        self.transitions[state * self.alphabet.len() + symbol_index]
    }

    /// Successor of `state` on `symbol`, or `None` for a symbol outside the
    /// alphabet or an unknown state.
    #[must_use]
    pub fn successor(&self, state: StateId, symbol: &S) -> Option<StateId> {
        if state >= self.num_states() {
            return None;
        }
        let idx = self.symbol_index(symbol)?;
        Some(self.successor_by_index(state, idx))
    }

    /// State reached by reading `word` from the initial state.
    #[must_use]
    pub fn run(&self, word: &[S]) -> Option<StateId> {
        word.iter()
            .try_fold(self.initial, |state, symbol| self.successor(state, symbol))
    }

    /// Whether the acceptor accepts `word`.
    ///
    /// Words containing a symbol outside the alphabet are rejected.
    #[must_use]
    pub fn accepts(&self, word: &[S]) -> bool {
        self.run(word).is_some_and(|q| self.accepting[q])
    }

    /// Every state/symbol pair has a successor inside the state set.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.transitions.len() == self.num_states() * self.alphabet.len()
            && self.transitions.iter().all(|&t| t < self.num_states())
    }

    /// States reachable from the initial state, in breadth-first order.
    #[must_use]
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.num_states()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.initial]);
        seen[self.initial] = true;

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for i in 0..self.alphabet.len() {
                let next = self.successor_by_index(state, i);
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        order
    }
}

impl<S: Symbol + fmt::Display> fmt::Display for Acceptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_states().to_string().len().max(1);
        write!(f, "{:<4}{:>width$}", "", "")?;
        for symbol in &self.alphabet {
            write!(f, " {:>width$}", symbol.to_string())?;
        }
        writeln!(f)?;

        for state in 0..self.num_states() {
            let marker = match (state == self.initial, self.accepting[state]) {
                (true, true) => "->*",
                (true, false) => "-> ",
                (false, true) => "  *",
                (false, false) => "   ",
            };
            write!(f, "{marker} {state:>width$}")?;
            for i in 0..self.alphabet.len() {
                write!(f, " {:>width$}", self.successor_by_index(state, i))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Words over {a, b} with an even number of `a`s.
    fn even_as() -> Acceptor<char> {
        Acceptor::new(vec!['a', 'b'], vec![vec![1, 0], vec![0, 1]], 0, vec![true, false]).unwrap()
    }

    #[test]
    fn test_accepts_even_as() {
        let dfa = even_as();
        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&['a', 'b', 'a']));
        assert!(!dfa.accepts(&['a']));
        assert!(!dfa.accepts(&['b', 'a', 'b']));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let dfa = even_as();
        assert!(!dfa.accepts(&['c']));
        assert_eq!(dfa.run(&['a', 'c']), None);
        assert_eq!(dfa.successor(0, &'c'), None);
    }

    #[test]
    fn test_rejects_partial_table() {
        let err = Acceptor::new(vec!['a', 'b'], vec![vec![0]], 0, vec![false]).unwrap_err();
        assert!(matches!(err, GigError::InvalidAcceptor(_)));
    }

    #[test]
    fn test_rejects_out_of_range_successor() {
        let err = Acceptor::new(vec!['a'], vec![vec![3]], 0, vec![false]).unwrap_err();
        assert!(matches!(err, GigError::InvalidAcceptor(_)));
    }

    #[test]
    fn test_rejects_unsorted_alphabet() {
        let err = Acceptor::new(vec!['b', 'a'], vec![vec![0, 0]], 0, vec![false]).unwrap_err();
        assert!(matches!(err, GigError::InvalidAcceptor(_)));
    }

    #[test]
    fn test_reachable_states() {
        let dfa = Acceptor::new(
            vec!['a'],
            vec![vec![1], vec![1], vec![0]],
            0,
            vec![false, true, false],
        )
        .unwrap();
        assert_eq!(dfa.reachable_states(), vec![0, 1]);
        assert_eq!(dfa.accepting_states(), vec![1]);
        assert!(dfa.is_total());
    }

    #[test]
    fn test_display_marks_initial_and_accepting() {
        let text = even_as().to_string();
        assert!(text.contains("->*"));
        assert!(text.lines().count() == 3);
    }
}
