//! Graphs induced by single clusters.

use super::AggregateError;
use crate::{
    hierarchy::Partition,
    ids::{ClusterId, MotifId, NodeId},
    motif::{MotifCatalog, WeightedEdge},
};

/// Graph induced by the source nodes of one cluster's members.
///
/// The weighted adjacency matrix is dense, symmetric and row-major over
/// [`Self::nodes`]. Absent edges read as `0`; use [`Self::has_edge`] to tell
/// them apart from zero-weight edges.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSubgraph {
    cluster: ClusterId,
    nodes: Vec<NodeId>,
    adjacency: Vec<f32>,
    linked: Vec<bool>,
    edge_count: usize,
}

impl ClusterSubgraph {
    /// Keeps the edges of `edges` with both endpoints in `nodes`. A repeated
    /// edge keeps its first weight.
    pub(super) fn induced(
        cluster: ClusterId,
        mut nodes: Vec<NodeId>,
        edges: &[WeightedEdge],
    ) -> Self {
        nodes.sort_unstable();
        nodes.dedup();
        let n = nodes.len();
        let mut adjacency = vec![0.0; n * n];
        let mut linked = vec![false; n * n];
        let mut edge_count = 0;
        for edge in edges {
            let (Ok(i), Ok(j)) = (
                nodes.binary_search(&edge.from()),
                nodes.binary_search(&edge.to()),
            ) else {
                continue;
            };
            if linked[i * n + j] {
                continue;
            }
            for slot in [i * n + j, j * n + i] {
                linked[slot] = true;
                adjacency[slot] = edge.weight();
            }
            edge_count += 1;
        }
        Self {
            cluster,
            nodes,
            adjacency,
            linked,
            edge_count,
        }
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn cluster(&self) -> ClusterId { self.cluster }

    /// Member source nodes, ascending. Row `i` of the matrix is `nodes()[i]`.
    #[rustfmt::skip]
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] { &self.nodes }

    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.nodes.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Number of distinct edges inside the cluster, self-loops included.
    #[rustfmt::skip]
    #[must_use]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Row-major `len() × len()` weighted adjacency matrix.
    #[rustfmt::skip]
    #[must_use]
    pub fn adjacency(&self) -> &[f32] { &self.adjacency }

    /// Adjacency row `i`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        let n = self.nodes.len();
        (i < n).then(|| &self.adjacency[i * n..(i + 1) * n])
    }

    /// Weight between rows `i` and `j`; `0` when they are not joined.
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> Option<f32> {
        let n = self.nodes.len();
        (i < n && j < n).then(|| self.adjacency[i * n + j])
    }

    /// Whether rows `i` and `j` are joined by an edge.
    #[must_use]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        let n = self.nodes.len();
        i < n && j < n && self.linked[i * n + j]
    }

    /// Number of edges at row `i`, a self-loop counting once.
    pub(super) fn degree(&self, i: usize) -> usize {
        let n = self.nodes.len();
        self.linked[i * n..(i + 1) * n]
            .iter()
            .filter(|&&linked| linked)
            .count()
    }
}

pub(super) fn source_nodes(
    members: &[MotifId],
    catalog: &MotifCatalog,
) -> Result<Vec<NodeId>, AggregateError> {
    members
        .iter()
        .map(|&id| {
            catalog
                .by_id(id)
                .map(|motif| motif.source())
                .ok_or(AggregateError::UnknownMotif { id })
        })
        .collect()
}

/// Graph induced by cluster `cluster` of `partition` over `edges`.
///
/// # Examples
/// ```
/// use motifold_core::{
///     ClusterId, Motif, MotifCatalog, NodeId, Partition, WeightedEdge, cluster_subgraph,
/// };
///
/// let catalog = MotifCatalog::new(
///     (1..=3).map(|id| Motif::from_source(NodeId::new(id), vec![], vec![])).collect(),
/// )?;
/// let partition = Partition::try_new(
///     catalog.ids(),
///     vec![ClusterId::new(0), ClusterId::new(0), ClusterId::new(1)],
/// )?;
/// let edges = [
///     WeightedEdge::new(NodeId::new(2), NodeId::new(1), 4.0),
///     WeightedEdge::new(NodeId::new(2), NodeId::new(3), 9.0),
/// ];
/// let subgraph = cluster_subgraph(&partition, &catalog, &edges, ClusterId::new(0))?;
/// assert_eq!(subgraph.nodes(), &[NodeId::new(1), NodeId::new(2)]);
/// assert_eq!(subgraph.adjacency(), &[0.0, 4.0, 4.0, 0.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns [`AggregateError::UnknownCluster`] when `partition` has no such
/// cluster and [`AggregateError::UnknownMotif`] when a member is missing
/// from `catalog`.
pub fn cluster_subgraph(
    partition: &Partition,
    catalog: &MotifCatalog,
    edges: &[WeightedEdge],
    cluster: ClusterId,
) -> Result<ClusterSubgraph, AggregateError> {
    let members = usize::try_from(cluster.get())
        .ok()
        .and_then(|index| partition.classes().into_iter().nth(index))
        .ok_or(AggregateError::UnknownCluster {
            cluster,
            clusters: partition.cluster_count(),
        })?;
    Ok(ClusterSubgraph::induced(
        cluster,
        source_nodes(&members, catalog)?,
        edges,
    ))
}
