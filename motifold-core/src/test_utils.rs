//! Shared test utilities for `motifold-core`.

use motifold_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    ids::NodeId,
    motif::{EdgeKind, Motif, MotifEdge},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// Keeps property suites aligned on the same `PROPTEST_CASES` and
/// `MOTIFOLD_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a star motif whose spokes carry `weights`.
///
/// Neighbours are numbered `source + 1`, `source + 2`, and so on.
#[must_use]
pub(crate) fn star_motif(source: u64, weights: &[f32]) -> Motif {
    let centre = NodeId::new(source);
    let neighbors: Vec<NodeId> = (1..=weights.len() as u64)
        .map(|offset| NodeId::new(source + offset))
        .collect();
    let edges = neighbors
        .iter()
        .zip(weights)
        .map(|(&neighbor, &weight)| MotifEdge::new(centre, neighbor, weight, EdgeKind::Spoke))
        .collect();
    Motif::from_source(centre, neighbors, edges)
}
