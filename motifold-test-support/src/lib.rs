//! Shared test utilities used across motifold crates.

pub mod ci;
pub mod tracing;
