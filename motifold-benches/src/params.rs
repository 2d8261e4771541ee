//! Benchmark parameter labels.

use std::fmt;

use motifold_core::Linkage;

/// Size of a generated catalog, used as a Criterion parameter label.
#[derive(Clone, Copy, Debug)]
pub struct CatalogBenchParams {
    /// Number of motifs, one per graph node.
    pub motif_count: usize,
    /// Minimum neighbour count per node in the generated graph.
    pub degree: usize,
}

impl fmt::Display for CatalogBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.motif_count, self.degree)
    }
}

/// Dendrogram benchmark label.
#[derive(Clone, Copy, Debug)]
pub struct DendrogramBenchParams {
    /// Number of leaves.
    pub motif_count: usize,
    /// Linkage under test.
    pub linkage: Linkage,
}

impl fmt::Display for DendrogramBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},{}", self.motif_count, self.linkage)
    }
}
