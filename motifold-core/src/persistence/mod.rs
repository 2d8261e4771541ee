//! Zero-dimensional persistence of weighted graph filtrations.
//!
//! Sweeping an edge-weight threshold upwards and adding edges as it passes
//! them merges connected components. Each merge kills the younger of the two
//! components and yields a finite `(birth, death)` pair; components alive at
//! the end yield an essential pair with infinite death. The extractor is a
//! thin driver over the ascending [`MergeEngine`](crate::MergeEngine);
//! the maximum spanning forest that feeds per-motif diagrams drives the same
//! engine in descending order.

mod diagram;
mod extract;
mod spanning;

use thiserror::Error;

use crate::{error::define_error_codes, ids::NodeId, merge::MergeError, motif::WeightedEdge};

pub use self::{
    diagram::{PersistenceDiagram, PersistencePair},
    extract::{extract_persistence_pairs, extract_persistence_pairs_with_nodes, motif_persistence},
    spanning::{SpanningForest, maximum_spanning_forest},
};

/// Errors returned while extracting persistence or spanning forests.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum PersistenceError {
    /// An edge weight was NaN or infinite.
    #[error("edge ({from}, {to}) has a non-finite weight")]
    NonFiniteWeight {
        /// First endpoint of the offending edge.
        from: NodeId,
        /// Second endpoint of the offending edge.
        to: NodeId,
    },
    /// An edge weight fell below the zero birth of every vertex.
    #[error("edge ({from}, {to}) has negative weight {weight}")]
    NegativeWeight {
        /// First endpoint of the offending edge.
        from: NodeId,
        /// Second endpoint of the offending edge.
        to: NodeId,
        /// Offending weight.
        weight: f32,
    },
    /// The merge engine rejected a candidate.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

define_error_codes! {
    /// Machine-readable error codes for [`PersistenceError`].
    enum PersistenceErrorCode for PersistenceError {
        /// An edge weight was NaN or infinite.
        NonFiniteWeight => NonFiniteWeight { .. } => "PERSISTENCE_NON_FINITE_WEIGHT",
        /// An edge weight fell below zero.
        NegativeWeight => NegativeWeight { .. } => "PERSISTENCE_NEGATIVE_WEIGHT",
        /// The merge engine rejected a candidate.
        MergeFailure => Merge(..) => "PERSISTENCE_MERGE_FAILURE",
    }
}

/// Dense numbering of the nodes a filtration touches.
///
/// Node `universe[i]` is merge-engine item `i`; ids are sorted so candidate
/// order by dense index matches order by node id.
struct NodeUniverse {
    nodes: Vec<NodeId>,
}

impl NodeUniverse {
    fn new(nodes: &[NodeId], edges: &[WeightedEdge]) -> Self {
        let mut all = Vec::with_capacity(nodes.len() + edges.len() * 2);
        all.extend_from_slice(nodes);
        for edge in edges {
            all.push(edge.from());
            all.push(edge.to());
        }
        all.sort_unstable();
        all.dedup();
        Self { nodes: all }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, index: usize) -> NodeId {
        self.nodes[index]
    }

    /// Dense index of `id`; every node passed to [`Self::new`] is present.
    fn index(&self, id: NodeId) -> usize {
        self.nodes.partition_point(|&node| node < id)
    }

    fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

fn check_finite(edge: &WeightedEdge) -> Result<(), PersistenceError> {
    if edge.weight().is_finite() {
        Ok(())
    } else {
        Err(PersistenceError::NonFiniteWeight {
            from: edge.from(),
            to: edge.to(),
        })
    }
}
