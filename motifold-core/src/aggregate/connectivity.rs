//! Splitting clusters along graph connectivity.

use std::collections::BTreeMap;

use super::AggregateError;
use crate::{
    hierarchy::Partition,
    ids::NodeId,
    merge::MergeEngine,
    motif::{MotifCatalog, WeightedEdge},
};

/// Refines `partition` so every cluster is connected in the graph.
///
/// Two motifs stay together only when they share a cluster and their source
/// nodes are joined by a path of `edges` whose endpoints are all sources of
/// motifs in that same cluster. Clusters of the result are numbered by first
/// leaf, like any partition cut from a dendrogram.
///
/// # Errors
/// Returns [`AggregateError::UnknownMotif`] when the partition names a motif
/// missing from `catalog`.
pub fn split_disconnected(
    partition: &Partition,
    catalog: &MotifCatalog,
    edges: &[WeightedEdge],
) -> Result<Partition, AggregateError> {
    let mut leaves_by_source: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
    for (index, &id) in partition.leaves().iter().enumerate() {
        let motif = catalog
            .by_id(id)
            .ok_or(AggregateError::UnknownMotif { id })?;
        leaves_by_source.entry(motif.source()).or_default().push(index);
    }

    let clusters = partition.assignments();
    let mut engine = MergeEngine::new(partition.len());
    for leaves in leaves_by_source.values() {
        for pair in leaves.windows(2) {
            if clusters[pair[0]] == clusters[pair[1]] {
                engine.union(pair[0], pair[1], 0.0)?;
            }
        }
    }
    for edge in edges {
        let (Some(left), Some(right)) = (
            leaves_by_source.get(&edge.from()),
            leaves_by_source.get(&edge.to()),
        ) else {
            continue;
        };
        for &a in left {
            for &b in right {
                if clusters[a] == clusters[b] {
                    engine.union(a, b, 0.0)?;
                }
            }
        }
    }

    Ok(Partition::from_representatives(
        partition.leaves().to_vec(),
        &engine.representatives(),
    ))
}
