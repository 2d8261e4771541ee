//! Benchmark support crate for motifold.
//!
//! Generates reproducible random graphs and their ego-motif catalogs for the
//! Criterion benchmarks of distance computation, dendrogram construction and
//! persistence extraction.

pub mod error;
pub mod params;
pub mod synthetic;
