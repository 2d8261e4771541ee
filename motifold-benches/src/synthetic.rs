//! Seeded random graphs and their ego-motif catalogs.

use std::collections::BTreeMap;

use motifold_core::{
    CatalogError, EdgeKind, Motif, MotifCatalog, MotifEdge, NodeId, WeightedEdge,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Shape of a generated graph.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Minimum neighbour count of every node.
    pub degree: usize,
    /// Weights are drawn uniformly from `[1.0, max_weight)`.
    pub max_weight: f32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Rejected graph configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntheticError {
    /// Fewer than two nodes leave no room for edges.
    #[error("node_count must be at least 2 (got {got})")]
    TooFewNodes {
        /// Requested node count.
        got: usize,
    },
    /// Each node can reach at most `node_count - 1` others.
    #[error("degree {degree} exceeds the {available} other nodes")]
    DegreeTooLarge {
        /// Requested degree.
        degree: usize,
        /// Nodes reachable from any node.
        available: usize,
    },
    /// The weight range is empty or not finite.
    #[error("max_weight must be finite and greater than 1 (got {got})")]
    InvalidWeightRange {
        /// Requested upper bound.
        got: f32,
    },
}

/// Undirected simple graph with positive edge weights.
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    node_count: usize,
    adjacency: BTreeMap<u64, BTreeMap<u64, f32>>,
}

impl SyntheticGraph {
    /// Draws a graph where every node ends up with at least `degree`
    /// neighbours.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is unusable.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        validate(config)?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let nodes = config.node_count as u64;
        let mut adjacency: BTreeMap<u64, BTreeMap<u64, f32>> =
            (0..nodes).map(|node| (node, BTreeMap::new())).collect();

        for from in 0..nodes {
            while adjacency.get(&from).map_or(0, BTreeMap::len) < config.degree {
                let to = rng.gen_range(0..nodes);
                if to == from || adjacency.get(&from).is_some_and(|row| row.contains_key(&to)) {
                    continue;
                }
                let weight = rng.gen_range(1.0..config.max_weight);
                adjacency.entry(from).or_default().insert(to, weight);
                adjacency.entry(to).or_default().insert(from, weight);
            }
        }
        Ok(Self {
            node_count: config.node_count,
            adjacency,
        })
    }

    /// Number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Every edge once, lower endpoint first.
    #[must_use]
    pub fn edges(&self) -> Vec<WeightedEdge> {
        self.adjacency
            .iter()
            .flat_map(|(&from, row)| {
                row.range(from + 1..)
                    .map(move |(&to, &weight)| {
                        WeightedEdge::new(NodeId::new(from), NodeId::new(to), weight)
                    })
            })
            .collect()
    }

    /// One-hop motif around `source`: spokes to each neighbour plus the
    /// edges between neighbours.
    #[must_use]
    pub fn ego_motif(&self, source: u64) -> Motif {
        let empty = BTreeMap::new();
        let row = self.adjacency.get(&source).unwrap_or(&empty);
        let mut edges: Vec<MotifEdge> = row
            .iter()
            .map(|(&to, &weight)| {
                MotifEdge::new(NodeId::new(source), NodeId::new(to), weight, EdgeKind::Spoke)
            })
            .collect();
        for &a in row.keys() {
            let Some(links) = self.adjacency.get(&a) else {
                continue;
            };
            for (&b, &weight) in links.range(a + 1..) {
                if row.contains_key(&b) {
                    edges.push(MotifEdge::new(
                        NodeId::new(a),
                        NodeId::new(b),
                        weight,
                        EdgeKind::Internal,
                    ));
                }
            }
        }
        Motif::from_source(
            NodeId::new(source),
            row.keys().copied().map(NodeId::new).collect(),
            edges,
        )
    }

    /// Catalog of every node's ego motif.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if a generated weight is not finite.
    pub fn catalog(&self) -> Result<MotifCatalog, CatalogError> {
        MotifCatalog::new(
            self.adjacency
                .keys()
                .map(|&source| self.ego_motif(source))
                .collect(),
        )
    }
}

fn validate(config: &SyntheticGraphConfig) -> Result<(), SyntheticError> {
    if config.node_count < 2 {
        return Err(SyntheticError::TooFewNodes {
            got: config.node_count,
        });
    }
    let available = config.node_count - 1;
    if config.degree > available {
        return Err(SyntheticError::DegreeTooLarge {
            degree: config.degree,
            available,
        });
    }
    if !(config.max_weight.is_finite() && config.max_weight > 1.0) {
        return Err(SyntheticError::InvalidWeightRange {
            got: config.max_weight,
        });
    }
    Ok(())
}
