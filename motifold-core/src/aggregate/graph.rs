//! Compressed inter-supernode graph.

use std::collections::{BTreeMap, HashMap};

use super::{AggregateError, Supernode};
use crate::{
    ids::NodeId,
    motif::{MotifCatalog, WeightedEdge},
};

/// Aggregated edge between two supernodes (or plain nodes).
///
/// Endpoints are the source nodes of the supernodes' representatives; graph
/// nodes that are not the source of any clustered motif stand for
/// themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuperLink {
    source: NodeId,
    target: NodeId,
    weight: f32,
    multiplicity: usize,
}

impl SuperLink {
    /// Smaller endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub const fn source(&self) -> NodeId { self.source }

    /// Larger endpoint.
    #[rustfmt::skip]
    #[must_use]
    pub const fn target(&self) -> NodeId { self.target }

    /// Mean weight of the original edges folded into this link.
    #[rustfmt::skip]
    #[must_use]
    pub const fn weight(&self) -> f32 { self.weight }

    /// Number of original edges folded into this link.
    #[rustfmt::skip]
    #[must_use]
    pub const fn multiplicity(&self) -> usize { self.multiplicity }
}

/// Supernodes plus the links between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressedGraph {
    supernodes: Vec<Supernode>,
    links: Vec<SuperLink>,
}

impl CompressedGraph {
    #[rustfmt::skip]
    #[must_use]
    pub fn supernodes(&self) -> &[Supernode] { &self.supernodes }

    /// Links ordered by `(source, target)`.
    #[rustfmt::skip]
    #[must_use]
    pub fn links(&self) -> &[SuperLink] { &self.links }

    /// Consumes the graph, returning supernodes and links.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Supernode>, Vec<SuperLink>) {
        (self.supernodes, self.links)
    }
}

/// Folds `edges` onto `supernodes`.
///
/// Each edge endpoint is replaced by its supernode's representative source
/// node. Edges inside one supernode are dropped; parallel edges between two
/// supernodes merge into one link carrying their mean weight.
///
/// # Errors
/// Returns [`AggregateError::UnknownMotif`] when a supernode member is
/// missing from `catalog`.
pub fn compress_graph(
    supernodes: Vec<Supernode>,
    catalog: &MotifCatalog,
    edges: &[WeightedEdge],
) -> Result<CompressedGraph, AggregateError> {
    let source_of = |id| {
        catalog
            .by_id(id)
            .map(|motif| motif.source())
            .ok_or(AggregateError::UnknownMotif { id })
    };

    let mut anchor: HashMap<NodeId, NodeId> = HashMap::new();
    for supernode in &supernodes {
        let representative = source_of(supernode.representative())?;
        for &member in supernode.members() {
            anchor.insert(source_of(member)?, representative);
        }
    }

    let mut folded: BTreeMap<(NodeId, NodeId), (f64, usize)> = BTreeMap::new();
    for edge in edges {
        let from = anchor.get(&edge.from()).copied().unwrap_or(edge.from());
        let to = anchor.get(&edge.to()).copied().unwrap_or(edge.to());
        if from == to {
            continue;
        }
        let key = if from < to { (from, to) } else { (to, from) };
        let entry = folded.entry(key).or_insert((0.0, 0));
        entry.0 += f64::from(edge.weight());
        entry.1 += 1;
    }

    let links = folded
        .into_iter()
        .map(|((source, target), (sum, multiplicity))| SuperLink {
            source,
            target,
            weight: (sum / multiplicity as f64) as f32,
            multiplicity,
        })
        .collect();

    Ok(CompressedGraph { supernodes, links })
}
