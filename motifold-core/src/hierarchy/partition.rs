//! Flat cluster assignments read off a dendrogram.

use std::collections::HashSet;

use thiserror::Error;

use crate::{
    error::define_error_codes,
    ids::{ClusterId, MotifId},
};

/// Assignment of every dendrogram leaf to a cluster.
///
/// Cluster identifiers are contiguous from zero. Partitions produced by
/// [`crate::partition_at`] number clusters in order of each cluster's first
/// leaf.
///
/// # Examples
/// ```
/// use motifold_core::{ClusterId, MotifId, Partition};
///
/// let partition = Partition::try_new(
///     vec![MotifId::new(7), MotifId::new(8)],
///     vec![ClusterId::new(0), ClusterId::new(0)],
/// )
/// .expect("assignments are contiguous");
/// assert_eq!(partition.cluster_count(), 1);
/// assert_eq!(partition.cluster_of(MotifId::new(8)), Some(ClusterId::new(0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    leaves: Vec<MotifId>,
    assignments: Vec<ClusterId>,
    cluster_count: usize,
}

/// Error returned when a [`Partition`] cannot be built from assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PartitionError {
    /// The assignments do not include cluster `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// The assignments skip identifiers.
    #[error("cluster identifiers must be contiguous without gaps")]
    Gap,
    /// Leaves and assignments differ in length.
    #[error("{leaves} leaves but {assignments} assignments")]
    LengthMismatch {
        /// Number of leaves.
        leaves: usize,
        /// Number of assignments.
        assignments: usize,
    },
    /// A leaf identifier appears twice.
    #[error("leaf {id} appears more than once")]
    DuplicateLeaf {
        /// Repeated identifier.
        id: MotifId,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`PartitionError`].
    enum PartitionErrorCode for PartitionError {
        /// The assignments do not include cluster `0`.
        MissingZero => MissingZero => "PARTITION_MISSING_ZERO",
        /// The assignments skip identifiers.
        Gap => Gap => "PARTITION_GAP",
        /// Leaves and assignments differ in length.
        LengthMismatch => LengthMismatch { .. } => "PARTITION_LENGTH_MISMATCH",
        /// A leaf identifier appears twice.
        DuplicateLeaf => DuplicateLeaf { .. } => "PARTITION_DUPLICATE_LEAF",
    }
}

impl Partition {
    /// Builds a partition from explicit assignments.
    ///
    /// An empty partition is accepted and has no clusters.
    ///
    /// # Errors
    /// Returns [`PartitionError::LengthMismatch`] when the inputs differ in
    /// length, [`PartitionError::DuplicateLeaf`] when a leaf repeats,
    /// [`PartitionError::MissingZero`] when cluster `0` is absent and
    /// [`PartitionError::Gap`] when identifiers skip values.
    pub fn try_new(
        leaves: Vec<MotifId>,
        assignments: Vec<ClusterId>,
    ) -> Result<Self, PartitionError> {
        if leaves.len() != assignments.len() {
            return Err(PartitionError::LengthMismatch {
                leaves: leaves.len(),
                assignments: assignments.len(),
            });
        }
        let mut seen_leaves = HashSet::with_capacity(leaves.len());
        if let Some(&id) = leaves.iter().find(|&&id| !seen_leaves.insert(id)) {
            return Err(PartitionError::DuplicateLeaf { id });
        }
        if assignments.is_empty() {
            return Ok(Self {
                leaves,
                assignments,
                cluster_count: 0,
            });
        }

        let seen: HashSet<u64> = assignments.iter().map(|id| id.get()).collect();
        if !seen.contains(&0) {
            return Err(PartitionError::MissingZero);
        }
        let max_id = seen.iter().copied().max().unwrap_or(0);
        if u64::try_from(seen.len()).ok() != max_id.checked_add(1) {
            return Err(PartitionError::Gap);
        }

        Ok(Self {
            leaves,
            cluster_count: seen.len(),
            assignments,
        })
    }

    /// Relabels group representatives as clusters in first-appearance order.
    pub(crate) fn from_representatives(leaves: Vec<MotifId>, representatives: &[usize]) -> Self {
        let mut labels: Vec<Option<ClusterId>> = vec![None; representatives.len()];
        let mut next = 0u64;
        let assignments = representatives
            .iter()
            .map(|&root| {
                *labels[root].get_or_insert_with(|| {
                    let id = ClusterId::new(next);
                    next += 1;
                    id
                })
            })
            .collect();
        Self {
            leaves,
            assignments,
            cluster_count: next as usize,
        }
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn leaves(&self) -> &[MotifId] { &self.leaves }

    #[rustfmt::skip]
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] { &self.assignments }

    /// Number of distinct clusters.
    #[rustfmt::skip]
    #[must_use]
    pub fn cluster_count(&self) -> usize { self.cluster_count }

    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.leaves.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.leaves.is_empty() }

    /// Cluster holding motif `id`.
    #[must_use]
    pub fn cluster_of(&self, id: MotifId) -> Option<ClusterId> {
        self.leaves
            .iter()
            .position(|&leaf| leaf == id)
            .map(|index| self.assignments[index])
    }

    /// Members of every cluster, indexed by cluster id, in leaf order.
    #[must_use]
    pub fn classes(&self) -> Vec<Vec<MotifId>> {
        let mut classes = vec![Vec::new(); self.cluster_count];
        for (leaf, cluster) in self.iter() {
            classes[cluster.get() as usize].push(leaf);
        }
        classes
    }

    /// `(leaf, cluster)` pairs in leaf order.
    pub fn iter(&self) -> impl Iterator<Item = (MotifId, ClusterId)> + '_ {
        self.leaves
            .iter()
            .copied()
            .zip(self.assignments.iter().copied())
    }
}
