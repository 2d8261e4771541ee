//! Maximum spanning forests through the descending merge engine.

use super::{NodeUniverse, PersistenceError, check_finite};
use crate::{
    ids::NodeId,
    merge::{MergeCandidate, MergeEngine},
    motif::WeightedEdge,
};

/// Maximum-weight spanning forest of an undirected graph.
///
/// Edges are listed in the order they were accepted, heaviest first.
/// Rejected edges (self-loops and edges closing a cycle) are kept in
/// `excluded`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanningForest {
    nodes: Vec<NodeId>,
    edges: Vec<WeightedEdge>,
    excluded: Vec<WeightedEdge>,
    total_weight: f64,
    component_count: usize,
}

impl SpanningForest {
    /// Every node of the graph, ascending.
    #[rustfmt::skip]
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }

    #[rustfmt::skip]
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] { &self.edges }

    #[rustfmt::skip]
    #[must_use]
    pub fn excluded(&self) -> &[WeightedEdge] { &self.excluded }

    /// Sum of accepted edge weights, accumulated in `f64`.
    #[rustfmt::skip]
    #[must_use]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Number of trees in the forest.
    #[rustfmt::skip]
    #[must_use]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Computes a maximum spanning forest with Kruskal's algorithm.
///
/// Edges are considered by descending weight, ties broken by the smaller then
/// the larger endpoint id. `nodes` lists vertices that may have no edges.
///
/// # Examples
/// ```
/// use motifold_core::{NodeId, WeightedEdge, maximum_spanning_forest};
///
/// let n = NodeId::new;
/// let forest = maximum_spanning_forest(
///     &[],
///     &[
///         WeightedEdge::new(n(1), n(2), 1.0),
///         WeightedEdge::new(n(2), n(3), 3.0),
///         WeightedEdge::new(n(1), n(3), 2.0),
///     ],
/// )?;
/// assert_eq!(forest.total_weight(), 5.0);
/// assert_eq!(forest.excluded(), &[WeightedEdge::new(n(1), n(2), 1.0)]);
/// # Ok::<(), motifold_core::PersistenceError>(())
/// ```
///
/// # Errors
/// Returns [`PersistenceError::NonFiniteWeight`] for NaN or infinite weights.
pub fn maximum_spanning_forest(
    nodes: &[NodeId],
    edges: &[WeightedEdge],
) -> Result<SpanningForest, PersistenceError> {
    for edge in edges {
        check_finite(edge)?;
    }

    let universe = NodeUniverse::new(nodes, edges);
    let mut ordered: Vec<(MergeCandidate, WeightedEdge)> = edges
        .iter()
        .map(|&edge| {
            let candidate = MergeCandidate::new(
                universe.index(edge.from()),
                universe.index(edge.to()),
                edge.weight(),
            );
            (candidate, edge)
        })
        .collect();
    ordered.sort_unstable_by(|(left, _), (right, _)| {
        right
            .value()
            .total_cmp(&left.value())
            .then_with(|| left.items().cmp(&right.items()))
    });

    let mut engine = MergeEngine::descending(universe.len());
    let mut kept = Vec::with_capacity(universe.len().saturating_sub(1));
    let mut excluded = Vec::new();
    let mut total_weight = 0.0f64;
    for (candidate, edge) in ordered {
        let (low, high) = candidate.items();
        if engine.union(low, high, candidate.value())?.is_some() {
            total_weight += f64::from(edge.weight());
            kept.push(edge);
        } else {
            excluded.push(edge);
        }
    }

    Ok(SpanningForest {
        component_count: engine.components(),
        nodes: universe.into_nodes(),
        edges: kept,
        excluded,
        total_weight,
    })
}
