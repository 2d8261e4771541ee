//! Dendrogram construction and threshold cuts.

#[cfg(feature = "parallel")]
use rayon::slice::ParallelSliceMut;
use tracing::{debug, instrument};

use super::{
    HierarchyError, Linkage,
    average::average_linkage_merges,
    forest::{LinkageNode, linkage_tree},
    partition::Partition,
};
use crate::{
    distance::DistanceMatrix,
    ids::MotifId,
    merge::{MergeCandidate, MergeEngine, MergeEvent},
};

/// Ordered merge history over a set of leaves.
///
/// Event values never decrease and a dendrogram over `n >= 1` leaves holds
/// exactly `n - 1` events.
///
/// # Examples
/// ```
/// use motifold_core::{DistanceMatrix, Linkage, MotifId, build_dendrogram};
///
/// let ids = vec![MotifId::new(1), MotifId::new(2), MotifId::new(3)];
/// // d(1,2) = 1, d(1,3) = 3, d(2,3) = 2
/// let matrix = DistanceMatrix::from_condensed(ids, vec![1.0, 3.0, 2.0])?;
/// let dendrogram = build_dendrogram(&matrix, Linkage::Single)?;
/// assert_eq!(dendrogram.cluster_count_at(1.5), 2);
/// assert_eq!(dendrogram.max_merge_value(), Some(2.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dendrogram {
    leaves: Vec<MotifId>,
    events: Vec<MergeEvent>,
    linkage: Linkage,
}

impl Dendrogram {
    /// Leaf identifiers in index order.
    #[rustfmt::skip]
    #[must_use]
    pub fn leaves(&self) -> &[MotifId] { &self.leaves }

    /// Merges in the order they were applied.
    #[rustfmt::skip]
    #[must_use]
    pub fn events(&self) -> &[MergeEvent] { &self.events }

    /// Linkage the dendrogram was built with.
    #[rustfmt::skip]
    #[must_use]
    pub const fn linkage(&self) -> Linkage { self.linkage }

    /// Number of leaves.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.leaves.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.leaves.is_empty() }

    /// Number of leading events with value `<= tau`.
    ///
    /// Non-positive and NaN thresholds select no events, so every leaf stays
    /// a singleton.
    #[must_use]
    pub fn prefix_len(&self, tau: f32) -> usize {
        if !(tau > 0.0) {
            return 0;
        }
        self.events.partition_point(|event| event.value() <= tau)
    }

    /// Number of clusters a cut at `tau` produces.
    #[must_use]
    pub fn cluster_count_at(&self, tau: f32) -> usize {
        self.leaves.len() - self.prefix_len(tau)
    }

    /// Value of the final merge, or `None` when there are no merges.
    #[must_use]
    pub fn max_merge_value(&self) -> Option<f32> {
        self.events.last().map(MergeEvent::value)
    }

    /// Binary tree view: leaves first, then one internal node per event.
    #[must_use]
    pub fn tree(&self) -> Vec<LinkageNode> {
        linkage_tree(self.leaves.len(), &self.events)
    }

    /// Cuts the dendrogram at `tau`; see [`partition_at`].
    ///
    /// # Errors
    /// Propagates [`HierarchyError::Merge`] from the replay.
    pub fn partition_at(&self, tau: f32) -> Result<Partition, HierarchyError> {
        partition_at(self, tau)
    }
}

#[cfg(feature = "parallel")]
fn sort_candidates(candidates: &mut [MergeCandidate]) {
    candidates.par_sort_unstable();
}

#[cfg(not(feature = "parallel"))]
fn sort_candidates(candidates: &mut [MergeCandidate]) {
    candidates.sort_unstable();
}

/// Builds the dendrogram of `matrix` under `linkage`.
///
/// Leaves are the matrix rows. An empty matrix yields an empty dendrogram.
///
/// # Errors
/// Returns [`HierarchyError::Merge`] when the engine rejects a candidate and
/// [`HierarchyError::IncompleteHierarchy`] when fewer than `n - 1` merges
/// were produced.
#[instrument(
    name = "core.build_dendrogram",
    err,
    skip(matrix),
    fields(items = matrix.len(), linkage = %linkage),
)]
pub fn build_dendrogram(
    matrix: &DistanceMatrix,
    linkage: Linkage,
) -> Result<Dendrogram, HierarchyError> {
    let n = matrix.len();
    let mut candidates: Vec<MergeCandidate> = match linkage {
        Linkage::Single => matrix
            .pairs()
            .map(|(i, j, value)| MergeCandidate::new(i, j, value))
            .collect(),
        Linkage::Average => average_linkage_merges(matrix),
    };
    sort_candidates(&mut candidates);

    let mut engine = MergeEngine::new(n);
    let events = engine.merge_all(candidates)?;
    let expected = n.saturating_sub(1);
    if events.len() != expected {
        return Err(HierarchyError::IncompleteHierarchy {
            events: events.len(),
            expected,
        });
    }
    debug!(events = events.len(), "dendrogram built");

    Ok(Dendrogram {
        leaves: matrix.ids().to_vec(),
        events,
        linkage,
    })
}

/// Cuts `dendrogram` at threshold `tau`.
///
/// Replays every event with value `<= tau` into a fresh engine. `tau <= 0`
/// and NaN leave every leaf in its own cluster; `tau` at or above the final
/// merge value yields a single cluster.
///
/// # Errors
/// Returns [`HierarchyError::Merge`] when the replay is rejected, which only
/// happens for a corrupted event list.
pub fn partition_at(dendrogram: &Dendrogram, tau: f32) -> Result<Partition, HierarchyError> {
    let prefix = dendrogram.prefix_len(tau);
    let mut engine = MergeEngine::new(dendrogram.len());
    for event in &dendrogram.events[..prefix] {
        engine.union(event.left(), event.right(), event.value())?;
    }
    record_partition_query();
    Ok(Partition::from_representatives(
        dendrogram.leaves.clone(),
        &engine.representatives(),
    ))
}

#[cfg(feature = "metrics")]
fn record_partition_query() {
    metrics::counter!("motifold_partition_queries_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_partition_query() {}
