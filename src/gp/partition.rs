//! Partition genomes and their canonical form.
//!
//! A genome assigns a group id to every state of the maximal canonical
//! acceptor; states sharing an id are merged. Many arrays describe the same
//! merge, so genomes are kept in canonical form: read left to right, the
//! first id is `0` and every new id is one more than the largest seen so far.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relabel group ids into canonical form.
///
/// Total and idempotent; arrays inducing the same equivalence classes map
/// to the same output.
#[must_use]
pub fn canonicalize(genes: &[usize]) -> Vec<usize> {
    let mut relabel: HashMap<usize, usize> = HashMap::with_capacity(genes.len());
    genes
        .iter()
        .map(|&group| {
            let next = relabel.len();
            *relabel.entry(group).or_insert(next)
        })
        .collect()
}

/// Whether `genes` is already in canonical form.
#[must_use]
pub fn is_canonical(genes: &[usize]) -> bool {
    let mut next = 0;
    for &group in genes {
        if group == next {
            next += 1;
        } else if group > next {
            return false;
        }
    }
    true
}

/// Whether two arrays induce the same merge of states.
#[must_use]
pub fn equals_canonical(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len() && canonicalize(a) == canonicalize(b)
}

/// A canonical partition of the MCA's states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<usize>", into = "Vec<usize>")]
pub struct Partition(Vec<usize>);

impl Partition {
    /// Canonicalize raw group ids into a partition.
    #[must_use]
    pub fn new(genes: &[usize]) -> Self {
        Self(canonicalize(genes))
    }

    /// One group per state: the unreduced acceptor.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Every state in a single group.
    #[must_use]
    pub fn single_group(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// The identity partition with states `i` and `j` merged.
    #[must_use]
    pub fn merge_pair(len: usize, i: usize, j: usize) -> Self {
        let mut genes: Vec<usize> = (0..len).collect();
        let (low, high) = if i <= j { (i, j) } else { (j, i) };
        if high < len {
            genes[high] = low;
        }
        Self::new(&genes)
    }

    /// Group ids, one per state index.
    #[must_use]
    pub fn genes(&self) -> &[usize] {
        &self.0
    }

    /// Number of genes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the partition covers no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct groups, i.e. states of the reduced acceptor.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.0.iter().max().map_or(0, |&m| m + 1)
    }

    /// Size of the largest group.
    #[must_use]
    pub fn max_group_size(&self) -> usize {
        let mut sizes = vec![0usize; self.group_count()];
        for &group in &self.0 {
            sizes[group] += 1;
        }
        sizes.into_iter().max().unwrap_or(0)
    }
}

impl From<Vec<usize>> for Partition {
    fn from(genes: Vec<usize>) -> Self {
        if is_canonical(&genes) {
            Self(genes)
        } else {
            Self::new(&genes)
        }
    }
}

impl From<Partition> for Vec<usize> {
    fn from(partition: Partition) -> Self {
        partition.0
    }
}
