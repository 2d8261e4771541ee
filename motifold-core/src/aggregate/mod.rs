//! Supernodes and the compressed graph built from a partition.
//!
//! A cut of the dendrogram groups motifs; each group becomes a supernode
//! represented by its smallest motif id. Groups can optionally be split
//! along the connectivity of the underlying graph first, so every supernode
//! stands for a connected region. The compressed graph then links
//! supernodes by the mean weight of the original edges between them.

mod connectivity;
mod graph;
mod pattern;
mod subgraph;
mod supernode;

use thiserror::Error;

use crate::{
    error::define_error_codes,
    ids::{ClusterId, MotifId},
    merge::MergeError,
};

pub use self::{
    connectivity::split_disconnected,
    graph::{CompressedGraph, SuperLink, compress_graph},
    pattern::{MotifPattern, unique_patterns},
    subgraph::{ClusterSubgraph, cluster_subgraph},
    supernode::{Supernode, aggregate},
};

/// Whether clusters are refined by graph connectivity before aggregation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ClusterConnectivity {
    /// Use the dendrogram cut unchanged.
    AsIs,
    /// Split each cluster into the connected components of the graph
    /// induced by its members' source nodes.
    #[default]
    SplitDisconnected,
}

/// Errors raised while aggregating a partition.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum AggregateError {
    /// The partition names a motif the catalog does not contain.
    #[error("partition references motif {id}, which is not in the catalog")]
    UnknownMotif {
        /// Identifier that could not be resolved.
        id: MotifId,
    },
    /// A cluster was requested that the partition does not have.
    #[error("cluster {cluster} is out of range for a partition with {clusters} clusters")]
    UnknownCluster {
        /// Requested cluster.
        cluster: ClusterId,
        /// Number of clusters in the partition.
        clusters: usize,
    },
    /// The merge engine rejected a connectivity union.
    #[error(transparent)]
    Merge(#[from] MergeError),
}

define_error_codes! {
    /// Machine-readable error codes for [`AggregateError`].
    enum AggregateErrorCode for AggregateError {
        /// The partition names a motif the catalog does not contain.
        UnknownMotif => UnknownMotif { .. } => "AGGREGATE_UNKNOWN_MOTIF",
        /// A cluster was requested that the partition does not have.
        UnknownCluster => UnknownCluster { .. } => "AGGREGATE_UNKNOWN_CLUSTER",
        /// The merge engine rejected a connectivity union.
        MergeFailure => Merge(..) => "AGGREGATE_MERGE_FAILURE",
    }
}

#[cfg(test)]
mod tests;
