//! Dendrogram construction and threshold cuts.
//!
//! A dendrogram is the ordered list of merge events produced by driving the
//! [`MergeEngine`](crate::MergeEngine) over motif distances. Cutting it at a
//! threshold `τ` replays the prefix of events with values `<= τ` into a
//! fresh engine and reads the resulting classes back as a [`Partition`].
//!
//! Two linkages are supported:
//!
//! - single linkage feeds every pair straight to the engine in ascending
//!   order, which is Kruskal's algorithm over the complete distance graph;
//! - average linkage (UPGMA) finds its merges with a nearest-neighbour
//!   chain and Lance-Williams updates, then replays them in ascending order.

mod average;
mod dendrogram;
mod forest;
mod partition;

use core::fmt;

use thiserror::Error;

use crate::{error::define_error_codes, merge::MergeError};

pub use self::{
    dendrogram::{Dendrogram, build_dendrogram, partition_at},
    forest::LinkageNode,
    partition::{Partition, PartitionError, PartitionErrorCode},
};

/// Rule for the distance between two clusters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Linkage {
    /// Minimum distance between members.
    Single,
    /// Mean distance between members (UPGMA).
    #[default]
    Average,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Average => f.write_str("average"),
        }
    }
}

/// Errors returned by dendrogram construction and threshold cuts.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum HierarchyError {
    /// The merge engine rejected a candidate.
    #[error(transparent)]
    Merge(#[from] MergeError),
    /// Fewer merges were produced than needed to join every leaf.
    #[error("hierarchy over {expected} merges is incomplete: only {events} recorded")]
    IncompleteHierarchy {
        /// Number of merge events recorded.
        events: usize,
        /// Number of merge events a full hierarchy needs.
        expected: usize,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`HierarchyError`].
    enum HierarchyErrorCode for HierarchyError {
        /// The merge engine rejected a candidate.
        MergeFailure => Merge(..) => "HIERARCHY_MERGE_FAILURE",
        /// Fewer merges were produced than needed to join every leaf.
        IncompleteHierarchy => IncompleteHierarchy { .. } => "HIERARCHY_INCOMPLETE",
    }
}

#[cfg(test)]
mod tests;
