//! Benchmark setup error type.

use motifold_core::{CatalogError, DistanceError, HierarchyError};

use crate::synthetic::SyntheticError;

/// Errors raised while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The synthetic graph configuration was rejected.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated motifs did not form a valid catalog.
    #[error("motif catalog construction failed: {0}")]
    Catalog(#[from] CatalogError),
    /// Distance computation failed.
    #[error("distance computation failed: {0}")]
    Distance(#[from] DistanceError),
    /// Dendrogram construction failed.
    #[error("dendrogram construction failed: {0}")]
    Hierarchy(#[from] HierarchyError),
}
