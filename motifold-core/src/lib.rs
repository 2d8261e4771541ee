//! Motifold core library.
//!
//! Summarises a weighted graph by clustering its local motifs and by
//! tracking how connected components appear as an edge-weight threshold
//! sweeps. Both pipelines run on one threshold-driven [`MergeEngine`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod builder;
mod distance;
mod error;
mod hierarchy;
mod ids;
mod merge;
mod motif;
mod motifold;
mod persistence;

pub use crate::{
    aggregate::{
        AggregateError, AggregateErrorCode, ClusterConnectivity, ClusterSubgraph, CompressedGraph,
        MotifPattern, SuperLink, Supernode, aggregate, cluster_subgraph, compress_graph,
        split_disconnected, unique_patterns,
    },
    builder::{ExecutionStrategy, MotifoldBuilder},
    distance::{
        DistanceError, DistanceErrorCode, DistanceMatrix, Side, SortedProfile,
        compute_distance_matrix, motif_distance, wasserstein_distance,
    },
    error::{MotifoldError, MotifoldErrorCode, Result},
    hierarchy::{
        Dendrogram, HierarchyError, HierarchyErrorCode, Linkage, LinkageNode, Partition,
        PartitionError, PartitionErrorCode, build_dendrogram, partition_at,
    },
    ids::{ClusterId, MotifId, NodeId},
    merge::{MergeCandidate, MergeEngine, MergeError, MergeErrorCode, MergeEvent, SweepDirection},
    motif::{
        CatalogError, CatalogErrorCode, EdgeKind, Motif, MotifCatalog, MotifEdge, WeightProfile,
        WeightedEdge,
    },
    motifold::{CompressionStats, MotifSummary, Motifold},
    persistence::{
        PersistenceDiagram, PersistenceError, PersistenceErrorCode, PersistencePair,
        SpanningForest, extract_persistence_pairs, extract_persistence_pairs_with_nodes,
        maximum_spanning_forest, motif_persistence,
    },
};

#[cfg(test)]
mod test_utils;
