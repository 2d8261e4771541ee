//! Motifs and the catalog that indexes them.
//!
//! A motif is the local neighbourhood of a source node: the source, its
//! neighbours and the weighted edges among them. The catalog keeps motifs in
//! ascending id order so that dense indices used by the distance matrix and
//! the merge engine map back to motif ids with a binary search.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    error::define_error_codes,
    ids::{MotifId, NodeId},
};

/// Position of an edge inside its motif.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EdgeKind {
    /// Edge between the source node and one of its neighbours.
    Spoke,
    /// Edge between two neighbours of the source node.
    Internal,
}

/// Weighted, undirected edge of a motif.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotifEdge {
    from: NodeId,
    to: NodeId,
    weight: f32,
    kind: EdgeKind,
}

impl MotifEdge {
    /// Creates a motif edge.
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId, weight: f32, kind: EdgeKind) -> Self {
        Self {
            from,
            to,
            weight,
            kind,
        }
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn from(&self) -> NodeId { self.from }

    #[rustfmt::skip]
    #[must_use]
    pub const fn to(&self) -> NodeId { self.to }

    #[rustfmt::skip]
    #[must_use]
    pub const fn weight(&self) -> f32 { self.weight }

    #[rustfmt::skip]
    #[must_use]
    pub const fn kind(&self) -> EdgeKind { self.kind }

    /// Drops the motif role, keeping endpoints and weight.
    #[must_use]
    pub const fn to_weighted(&self) -> WeightedEdge {
        WeightedEdge::new(self.from, self.to, self.weight)
    }
}

/// Weighted, undirected edge of the underlying graph.
///
/// Used for graph edges fed to the aggregator and for spanning-forest edges
/// fed to the persistence extractor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedEdge {
    from: NodeId,
    to: NodeId,
    weight: f32,
}

impl WeightedEdge {
    /// Creates a weighted edge.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{NodeId, WeightedEdge};
    ///
    /// let edge = WeightedEdge::new(NodeId::new(3), NodeId::new(1), 0.5);
    /// assert_eq!(edge.endpoints(), (NodeId::new(1), NodeId::new(3)));
    /// ```
    #[must_use]
    pub const fn new(from: NodeId, to: NodeId, weight: f32) -> Self {
        Self { from, to, weight }
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn from(&self) -> NodeId { self.from }

    #[rustfmt::skip]
    #[must_use]
    pub const fn to(&self) -> NodeId { self.to }

    #[rustfmt::skip]
    #[must_use]
    pub const fn weight(&self) -> f32 { self.weight }

    /// Returns the endpoints as `(smaller, larger)`.
    #[must_use]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// Selects which motif edges contribute to its weight distribution.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum WeightProfile {
    /// Every edge of the motif.
    #[default]
    All,
    /// Only edges between neighbours; spokes are ignored.
    InternalOnly,
}

impl WeightProfile {
    const fn admits(self, kind: EdgeKind) -> bool {
        match self {
            Self::All => true,
            Self::InternalOnly => matches!(kind, EdgeKind::Internal),
        }
    }
}

/// A source node, its neighbours and the weighted edges among them.
///
/// # Examples
/// ```
/// use motifold_core::{EdgeKind, Motif, MotifEdge, NodeId, WeightProfile};
///
/// let source = NodeId::new(0);
/// let motif = Motif::from_source(
///     source,
///     vec![NodeId::new(1), NodeId::new(2)],
///     vec![
///         MotifEdge::new(source, NodeId::new(1), 2.0, EdgeKind::Spoke),
///         MotifEdge::new(NodeId::new(1), NodeId::new(2), 1.0, EdgeKind::Internal),
///     ],
/// );
/// assert_eq!(motif.size(), 2);
/// assert_eq!(motif.weights(WeightProfile::InternalOnly), vec![1.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Motif {
    id: MotifId,
    source: NodeId,
    neighbors: Vec<NodeId>,
    edges: Vec<MotifEdge>,
}

impl Motif {
    /// Creates a motif with an explicit identifier.
    #[must_use]
    pub fn new(id: MotifId, source: NodeId, neighbors: Vec<NodeId>, edges: Vec<MotifEdge>) -> Self {
        Self {
            id,
            source,
            neighbors,
            edges,
        }
    }

    /// Creates a motif keyed by its source node.
    #[must_use]
    pub fn from_source(source: NodeId, neighbors: Vec<NodeId>, edges: Vec<MotifEdge>) -> Self {
        Self::new(MotifId::new(source.get()), source, neighbors, edges)
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn id(&self) -> MotifId { self.id }

    #[rustfmt::skip]
    #[must_use]
    pub const fn source(&self) -> NodeId { self.source }

    #[rustfmt::skip]
    #[must_use]
    pub fn neighbors(&self) -> &[NodeId] { &self.neighbors }

    #[rustfmt::skip]
    #[must_use]
    pub fn edges(&self) -> &[MotifEdge] { &self.edges }

    /// Number of neighbours of the source node.
    #[must_use]
    pub fn size(&self) -> usize {
        self.neighbors.len()
    }

    /// Edge weights admitted by `profile`, in edge order.
    #[must_use]
    pub fn weights(&self, profile: WeightProfile) -> Vec<f32> {
        self.edges
            .iter()
            .filter(|edge| profile.admits(edge.kind))
            .map(MotifEdge::weight)
            .collect()
    }

    /// Every node the motif touches, ascending and without repeats.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.neighbors.len() + 1);
        nodes.push(self.source);
        nodes.extend_from_slice(&self.neighbors);
        for edge in &self.edges {
            nodes.push(edge.from);
            nodes.push(edge.to);
        }
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// The motif's edges without their roles.
    #[must_use]
    pub fn spanning_edges(&self) -> Vec<WeightedEdge> {
        self.edges.iter().map(MotifEdge::to_weighted).collect()
    }
}

/// Errors raised while assembling a [`MotifCatalog`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    /// Two motifs share one identifier.
    #[error("motif {id} appears more than once")]
    DuplicateMotif {
        /// Identifier that was repeated.
        id: MotifId,
    },
    /// A motif edge carried a NaN or infinite weight.
    #[error("motif {motif} has a non-finite weight on edge ({from}, {to})")]
    NonFiniteWeight {
        /// Motif containing the offending edge.
        motif: MotifId,
        /// First endpoint of the offending edge.
        from: NodeId,
        /// Second endpoint of the offending edge.
        to: NodeId,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`CatalogError`].
    enum CatalogErrorCode for CatalogError {
        /// Two motifs share one identifier.
        DuplicateMotif => DuplicateMotif { .. } => "CATALOG_DUPLICATE_MOTIF",
        /// A motif edge carried a NaN or infinite weight.
        NonFiniteWeight => NonFiniteWeight { .. } => "CATALOG_NON_FINITE_WEIGHT",
    }
}

/// Id-unique collection of motifs in ascending id order.
///
/// The position of a motif in the catalog is its dense index throughout the
/// pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotifCatalog {
    motifs: Vec<Motif>,
}

impl MotifCatalog {
    /// Validates and indexes `motifs`.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateMotif`] when two motifs share an id and
    /// [`CatalogError::NonFiniteWeight`] when any edge weight is NaN or
    /// infinite.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{Motif, MotifCatalog, MotifId, NodeId};
    ///
    /// let catalog = MotifCatalog::new(vec![
    ///     Motif::from_source(NodeId::new(9), vec![], vec![]),
    ///     Motif::from_source(NodeId::new(2), vec![], vec![]),
    /// ])
    /// .expect("catalog is valid");
    /// assert_eq!(catalog.ids(), vec![MotifId::new(2), MotifId::new(9)]);
    /// assert_eq!(catalog.index_of(MotifId::new(9)), Some(1));
    /// ```
    pub fn new(mut motifs: Vec<Motif>) -> Result<Self, CatalogError> {
        motifs.sort_by_key(Motif::id);
        if let Some(pair) = motifs.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(CatalogError::DuplicateMotif { id: pair[0].id });
        }
        for motif in &motifs {
            if let Some(edge) = motif.edges.iter().find(|edge| !edge.weight.is_finite()) {
                return Err(CatalogError::NonFiniteWeight {
                    motif: motif.id,
                    from: edge.from,
                    to: edge.to,
                });
            }
        }
        Ok(Self { motifs })
    }

    /// Catalog that skips weight validation, for exercising downstream
    /// checks.
    #[cfg(test)]
    pub(crate) fn unvalidated(mut motifs: Vec<Motif>) -> Self {
        motifs.sort_by_key(Motif::id);
        Self { motifs }
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.motifs.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.motifs.is_empty() }

    #[rustfmt::skip]
    #[must_use]
    pub fn motifs(&self) -> &[Motif] { &self.motifs }

    /// Motif at dense index `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Motif> {
        self.motifs.get(index)
    }

    /// Dense index of the motif with identifier `id`.
    #[must_use]
    pub fn index_of(&self, id: MotifId) -> Option<usize> {
        self.motifs.binary_search_by_key(&id, Motif::id).ok()
    }

    /// Motif with identifier `id`.
    #[must_use]
    pub fn by_id(&self, id: MotifId) -> Option<&Motif> {
        self.index_of(id).and_then(|index| self.motifs.get(index))
    }

    /// Motif identifiers in dense-index order.
    #[must_use]
    pub fn ids(&self) -> Vec<MotifId> {
        self.motifs.iter().map(Motif::id).collect()
    }

    /// Undirected union of every motif's edges.
    ///
    /// Edges are keyed by their sorted endpoints and returned in that order;
    /// when several motifs share an edge the first weight seen wins.
    #[must_use]
    pub fn graph_edges(&self) -> Vec<WeightedEdge> {
        let mut edges: BTreeMap<(NodeId, NodeId), f32> = BTreeMap::new();
        for edge in self.motifs.iter().flat_map(|motif| motif.edges.iter()) {
            let weighted = edge.to_weighted();
            edges.entry(weighted.endpoints()).or_insert(weighted.weight);
        }
        edges
            .into_iter()
            .map(|((from, to), weight)| WeightedEdge::new(from, to, weight))
            .collect()
    }
}

impl<'a> IntoIterator for &'a MotifCatalog {
    type Item = &'a Motif;
    type IntoIter = std::slice::Iter<'a, Motif>;

    fn into_iter(self) -> Self::IntoIter {
        self.motifs.iter()
    }
}
