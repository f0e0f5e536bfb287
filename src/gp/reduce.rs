//! Quotienting the maximal canonical acceptor by a partition.

use crate::acceptor::{Acceptor, StateId, Symbol};
use crate::error::{GigError, Result};
use crate::gp::mca::Mca;
use crate::gp::partition::Partition;
use serde::Serialize;

/// Two merged states disagreed on the successor group for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// Group (reduced state) where the disagreement occurred.
    pub group: StateId,
    /// Alphabet position of the symbol.
    pub symbol_index: usize,
    /// Target group that was discarded.
    pub overwritten: StateId,
    /// Target group that was kept.
    pub chosen: StateId,
}

/// A reduced acceptor and the merge conflicts resolved while building it.
#[derive(Debug, Clone)]
pub struct Reduction<S> {
    /// The quotient acceptor; group ids are its states.
    pub acceptor: Acceptor<S>,
    /// Overwritten transitions, in processing order.
    pub conflicts: Vec<Conflict>,
}

/// Merge the MCA's states according to `partition`.
///
/// A group accepts if any of its members accepts. When members of a group
/// disagree on a successor, the member with the highest state index wins;
/// every such overwrite is recorded as a [`Conflict`].
///
/// # Errors
///
/// Returns [`GigError::InconsistentPartitionLength`] if the partition does
/// not have one gene per MCA state.
pub fn reduce<S: Symbol>(mca: &Mca<S>, partition: &Partition) -> Result<Reduction<S>> {
    let base = mca.acceptor();
    let genes = partition.genes();
    if genes.len() != base.num_states() {
        return Err(GigError::InconsistentPartitionLength {
            expected: base.num_states(),
            actual: genes.len(),
        });
    }

    let width = base.alphabet().len();
    let groups = partition.group_count();
    let mut table: Vec<Option<StateId>> = vec![None; groups * width];
    let mut accepting = vec![false; groups];
    let mut conflicts = Vec::new();

    for (state, &group) in genes.iter().enumerate() {
        if base.is_accepting(state) {
            accepting[group] = true;
        }
        for symbol_index in 0..width {
            let target = genes[base.successor_by_index(state, symbol_index)];
            let slot = &mut table[group * width + symbol_index];
            let previous = slot.replace(target);
            if let Some(previous) = previous.filter(|&p| p != target) {
                conflicts.push(Conflict {
                    group,
                    symbol_index,
                    overwritten: previous,
                    chosen: target,
                });
            }
        }
    }

    // Canonical partitions use every id in 0..groups, so each row was written.
    let transitions = table
        .iter()
        .enumerate()
        .map(|(slot, target)| target.unwrap_or(slot / width.max(1)))
        .collect();

    Ok(Reduction {
        acceptor: Acceptor::from_parts(
            base.alphabet().to_vec(),
            transitions,
            genes[base.initial()],
            accepting,
        ),
        conflicts,
    })
}
