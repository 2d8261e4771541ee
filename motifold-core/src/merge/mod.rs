//! Threshold-driven merge engine.
//!
//! A flat-arena union-find over a dense universe of items `0..n`. Callers
//! feed [`MergeCandidate`]s in monotone order of their merge value; every
//! union of two disjoint groups yields exactly one [`MergeEvent`] recording
//! which group survived and which one (the younger) ended. Both the
//! dendrogram builder and the persistence extractor are thin drivers over
//! this engine.

mod candidate;
mod engine;
mod event;

use thiserror::Error;

use crate::error::define_error_codes;

pub use self::{
    candidate::{MergeCandidate, SweepDirection},
    engine::MergeEngine,
    event::MergeEvent,
};

/// Errors returned by [`MergeEngine`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum MergeError {
    /// An item index lies outside the engine's universe.
    #[error("item {item} is outside the universe of {universe} items")]
    InvalidItem {
        /// Offending item index.
        item: usize,
        /// Number of items the engine was created with.
        universe: usize,
    },
    /// A merge value went against the sweep direction.
    #[error("merge value {current} arrived after {previous}, against the sweep direction")]
    OrderingViolation {
        /// Last accepted merge value.
        previous: f32,
        /// Merge value that broke the order.
        current: f32,
    },
    /// A merge value or birth was NaN or infinite.
    #[error("merge value {value} is not finite")]
    NonFiniteValue {
        /// Offending value.
        value: f32,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`MergeError`].
    enum MergeErrorCode for MergeError {
        /// An item index lies outside the engine's universe.
        InvalidItem => InvalidItem { .. } => "MERGE_INVALID_ITEM",
        /// A merge value went against the sweep direction.
        OrderingViolation => OrderingViolation { .. } => "MERGE_ORDERING_VIOLATION",
        /// A merge value or birth was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "MERGE_NON_FINITE_VALUE",
    }
}
