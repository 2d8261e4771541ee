//! Ascending filtration sweep producing persistence pairs.

use tracing::{debug, instrument};

use super::{
    NodeUniverse, PersistenceError, check_finite,
    diagram::{PersistenceDiagram, PersistencePair},
    spanning::maximum_spanning_forest,
};
use crate::{
    ids::NodeId,
    merge::{MergeCandidate, MergeEngine},
    motif::{Motif, WeightedEdge},
};

/// Extracts the persistence diagram of the filtration induced by `edges`.
///
/// The vertex set is every edge endpoint; see
/// [`extract_persistence_pairs_with_nodes`] to include isolated vertices.
///
/// # Examples
/// ```
/// use motifold_core::{NodeId, WeightedEdge, extract_persistence_pairs};
///
/// let diagram = extract_persistence_pairs(&[
///     WeightedEdge::new(NodeId::new(1), NodeId::new(2), 5.0),
///     WeightedEdge::new(NodeId::new(2), NodeId::new(3), 8.0),
/// ])?;
/// let deaths: Vec<f32> = diagram.pairs().iter().map(|pair| pair.death()).collect();
/// assert_eq!(deaths, vec![5.0, 8.0, f32::INFINITY]);
/// # Ok::<(), motifold_core::PersistenceError>(())
/// ```
///
/// # Errors
/// Returns [`PersistenceError::NonFiniteWeight`] for NaN or infinite weights
/// and [`PersistenceError::NegativeWeight`] for weights below zero.
pub fn extract_persistence_pairs(
    edges: &[WeightedEdge],
) -> Result<PersistenceDiagram, PersistenceError> {
    extract_persistence_pairs_with_nodes(&[], edges)
}

/// Extracts the persistence diagram over `nodes` plus every edge endpoint.
///
/// Every vertex is born at `0`. Edges are added in ascending
/// `(weight, smaller id, larger id)` order; each edge joining two components
/// yields `(younger birth, weight, younger node)` and each surviving
/// component yields `(birth, ∞, eldest node)`. Every vertex names exactly one
/// pair. A disconnected filtration simply
/// has several essential pairs.
///
/// # Errors
/// Returns [`PersistenceError::NonFiniteWeight`] for NaN or infinite weights
/// and [`PersistenceError::NegativeWeight`] for weights below zero.
#[instrument(
    name = "core.extract_persistence",
    err,
    skip(nodes, edges),
    fields(nodes = nodes.len(), edges = edges.len()),
)]
pub fn extract_persistence_pairs_with_nodes(
    nodes: &[NodeId],
    edges: &[WeightedEdge],
) -> Result<PersistenceDiagram, PersistenceError> {
    for edge in edges {
        check_finite(edge)?;
        if edge.weight() < 0.0 {
            return Err(PersistenceError::NegativeWeight {
                from: edge.from(),
                to: edge.to(),
                weight: edge.weight(),
            });
        }
    }

    let universe = NodeUniverse::new(nodes, edges);
    let mut candidates: Vec<MergeCandidate> = edges
        .iter()
        .map(|edge| {
            MergeCandidate::new(
                universe.index(edge.from()),
                universe.index(edge.to()),
                edge.weight(),
            )
        })
        .collect();
    candidates.sort_unstable();

    let mut engine = MergeEngine::new(universe.len());
    let events = engine.merge_all(candidates)?;

    let mut pairs: Vec<PersistencePair> = events
        .iter()
        .map(|event| {
            PersistencePair::new(
                event.younger_birth(),
                event.value(),
                universe.node(event.younger_feature()),
            )
        })
        .collect();
    for root in engine.roots() {
        pairs.push(PersistencePair::new(
            engine.birth(root)?,
            f32::INFINITY,
            universe.node(engine.feature(root)?),
        ));
    }
    debug!(
        finite = events.len(),
        essential = engine.components(),
        "persistence pairs extracted"
    );

    Ok(PersistenceDiagram::new(pairs))
}

/// Persistence diagram of a motif's maximum spanning forest.
///
/// The forest keeps the strongest edges that connect the motif; sweeping
/// them in ascending order gives one finite pair per forest edge and one
/// essential pair per connected piece of the motif.
///
/// # Errors
/// Returns [`PersistenceError::NonFiniteWeight`] or
/// [`PersistenceError::NegativeWeight`] when a motif edge carries an
/// unusable weight.
pub fn motif_persistence(motif: &Motif) -> Result<PersistenceDiagram, PersistenceError> {
    let forest = maximum_spanning_forest(&motif.nodes(), &motif.spanning_edges())?;
    extract_persistence_pairs_with_nodes(forest.nodes(), forest.edges())
}
