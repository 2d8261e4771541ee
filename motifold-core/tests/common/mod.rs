//! Shared fixtures for the integration suites.

use motifold_core::{EdgeKind, Motif, MotifCatalog, MotifEdge, NodeId};

/// Undirected edges of a small graph with two triangles and one bridge.
///
/// Triangle `{1, 2, 3}` is heavy (weight 5), triangle `{10, 11, 12}` is light
/// (weight 1) and the bridge `3 - 10` weighs 2.
pub const TWO_TRIANGLES: &[(u64, u64, f32)] = &[
    (1, 2, 5.0),
    (1, 3, 5.0),
    (2, 3, 5.0),
    (3, 10, 2.0),
    (10, 11, 1.0),
    (10, 12, 1.0),
    (11, 12, 1.0),
];

/// Builds the one-hop motif around `source` in `graph`.
#[must_use]
pub fn ego_motif(graph: &[(u64, u64, f32)], source: u64) -> Motif {
    let neighbors: Vec<u64> = graph
        .iter()
        .filter_map(|&(a, b, _)| match (a == source, b == source) {
            (true, false) => Some(b),
            (false, true) => Some(a),
            _ => None,
        })
        .collect();
    let edges = graph
        .iter()
        .filter_map(|&(a, b, weight)| {
            let touches = |node: u64| node == source || neighbors.contains(&node);
            if !(touches(a) && touches(b)) {
                return None;
            }
            let kind = if a == source || b == source {
                EdgeKind::Spoke
            } else {
                EdgeKind::Internal
            };
            Some(MotifEdge::new(NodeId::new(a), NodeId::new(b), weight, kind))
        })
        .collect();
    Motif::from_source(
        NodeId::new(source),
        neighbors.into_iter().map(NodeId::new).collect(),
        edges,
    )
}

/// Catalog of the ego motifs of every node in [`TWO_TRIANGLES`].
#[must_use]
pub fn two_triangles() -> MotifCatalog {
    let motifs = [1, 2, 3, 10, 11, 12]
        .into_iter()
        .map(|source| ego_motif(TWO_TRIANGLES, source))
        .collect();
    MotifCatalog::new(motifs).expect("fixture catalog is valid")
}
