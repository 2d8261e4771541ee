//! Grouping clusters by the shape of their induced subgraphs.

use std::cmp::Reverse;

use super::{
    AggregateError,
    subgraph::{ClusterSubgraph, source_nodes},
};
use crate::{
    hierarchy::Partition,
    ids::{ClusterId, NodeId},
    motif::{MotifCatalog, WeightedEdge},
};

/// Clusters whose induced subgraphs are isomorphic.
///
/// Shapes compare edge structure only; weights and node labels are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifPattern {
    sample: ClusterSubgraph,
    clusters: Vec<ClusterId>,
    nodes: Vec<NodeId>,
}

impl MotifPattern {
    /// Subgraph of the first cluster found with this shape.
    #[rustfmt::skip]
    #[must_use]
    pub const fn sample(&self) -> &ClusterSubgraph { &self.sample }

    /// Every cluster with this shape, ascending.
    #[rustfmt::skip]
    #[must_use]
    pub fn clusters(&self) -> &[ClusterId] { &self.clusters }

    /// Number of clusters with this shape.
    #[rustfmt::skip]
    #[must_use]
    pub fn count(&self) -> usize { self.clusters.len() }

    /// Source nodes across all matching clusters, ascending and distinct.
    #[rustfmt::skip]
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }
}

/// Unlabelled structure of a subgraph with cheap invariants up front.
struct Shape {
    n: usize,
    linked: Vec<bool>,
    degrees: Vec<usize>,
    sorted_degrees: Vec<usize>,
    edge_count: usize,
}

impl Shape {
    fn of(subgraph: &ClusterSubgraph) -> Self {
        let n = subgraph.len();
        let linked = (0..n * n)
            .map(|slot| subgraph.has_edge(slot / n, slot % n))
            .collect();
        let degrees: Vec<usize> = (0..n).map(|i| subgraph.degree(i)).collect();
        let mut sorted_degrees = degrees.clone();
        sorted_degrees.sort_unstable();
        Self {
            n,
            linked,
            degrees,
            sorted_degrees,
            edge_count: subgraph.edge_count(),
        }
    }

    fn linked(&self, i: usize, j: usize) -> bool {
        self.linked[i * self.n + j]
    }

    fn is_isomorphic(&self, other: &Self) -> bool {
        if self.n != other.n
            || self.edge_count != other.edge_count
            || self.sorted_degrees != other.sorted_degrees
        {
            return false;
        }
        let mut order: Vec<usize> = (0..self.n).collect();
        order.sort_by_key(|&v| Reverse(self.degrees[v]));
        let mut mapping = vec![0; self.n];
        let mut used = vec![false; self.n];
        self.extend_mapping(other, &order, 0, &mut mapping, &mut used)
    }

    /// Backtracking search that maps `order[depth..]` onto unused vertices of
    /// `other` while preserving adjacency with everything mapped so far.
    fn extend_mapping(
        &self,
        other: &Self,
        order: &[usize],
        depth: usize,
        mapping: &mut [usize],
        used: &mut [bool],
    ) -> bool {
        let Some(&v) = order.get(depth) else {
            return true;
        };
        for w in 0..other.n {
            if used[w] || other.degrees[w] != self.degrees[v] {
                continue;
            }
            let consistent = self.linked(v, v) == other.linked(w, w)
                && order[..depth]
                    .iter()
                    .all(|&u| self.linked(u, v) == other.linked(mapping[u], w));
            if !consistent {
                continue;
            }
            mapping[v] = w;
            used[w] = true;
            if self.extend_mapping(other, order, depth + 1, mapping, used) {
                return true;
            }
            used[w] = false;
        }
        false
    }
}

/// Groups the clusters of `partition` by the shape of their induced
/// subgraphs over `edges`.
///
/// Patterns appear in the order their first cluster appears.
///
/// # Examples
/// ```
/// use motifold_core::{
///     ClusterId, Motif, MotifCatalog, NodeId, Partition, WeightedEdge, unique_patterns,
/// };
///
/// let catalog = MotifCatalog::new(
///     (1..=4).map(|id| Motif::from_source(NodeId::new(id), vec![], vec![])).collect(),
/// )?;
/// let partition = Partition::try_new(
///     catalog.ids(),
///     [0, 0, 1, 1].into_iter().map(ClusterId::new).collect(),
/// )?;
/// let edges = [
///     WeightedEdge::new(NodeId::new(1), NodeId::new(2), 1.0),
///     WeightedEdge::new(NodeId::new(3), NodeId::new(4), 7.0),
/// ];
/// let patterns = unique_patterns(&partition, &catalog, &edges)?;
/// assert_eq!(patterns.len(), 1);
/// assert_eq!(patterns[0].count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns [`AggregateError::UnknownMotif`] when a member is missing from
/// `catalog`.
pub fn unique_patterns(
    partition: &Partition,
    catalog: &MotifCatalog,
    edges: &[WeightedEdge],
) -> Result<Vec<MotifPattern>, AggregateError> {
    let mut patterns: Vec<(Shape, MotifPattern)> = Vec::new();
    for (index, members) in partition.classes().iter().enumerate() {
        let cluster = ClusterId::new(index as u64);
        let subgraph =
            ClusterSubgraph::induced(cluster, source_nodes(members, catalog)?, edges);
        let shape = Shape::of(&subgraph);
        if let Some((_, pattern)) = patterns
            .iter_mut()
            .find(|(known, _)| known.is_isomorphic(&shape))
        {
            pattern.clusters.push(cluster);
            pattern.nodes.extend_from_slice(subgraph.nodes());
        } else {
            let nodes = subgraph.nodes().to_vec();
            patterns.push((
                shape,
                MotifPattern {
                    sample: subgraph,
                    clusters: vec![cluster],
                    nodes,
                },
            ));
        }
    }
    Ok(patterns
        .into_iter()
        .map(|(_, mut pattern)| {
            pattern.nodes.sort_unstable();
            pattern.nodes.dedup();
            pattern
        })
        .collect())
}
