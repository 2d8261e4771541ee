//! Pairwise dissimilarity between motifs.
//!
//! Motifs are compared through the distributions of their edge weights using
//! the 1-Wasserstein distance over sorted, zero-padded order statistics. The
//! resulting symmetric matrix is stored in condensed upper-triangle form.

mod matrix;
mod wasserstein;

use core::fmt;

use thiserror::Error;

use crate::{builder::ExecutionStrategy, error::define_error_codes, ids::MotifId};

pub use self::{
    matrix::{DistanceMatrix, compute_distance_matrix},
    wasserstein::{SortedProfile, motif_distance, wasserstein_distance},
};

/// Identifies which argument of a comparison produced an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing distances or assembling a matrix.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum DistanceError {
    /// A weight distribution contained NaN or an infinity.
    #[error("{which} distribution contains a non-finite weight at index {index}: {value}")]
    NonFiniteWeight {
        /// Argument holding the offending weight.
        which: Side,
        /// Position of the weight in the unsorted input.
        index: usize,
        /// Offending weight.
        value: f32,
    },
    /// A catalog motif carried a non-finite weight.
    #[error("motif {id} has a non-finite weight at index {index}: {value}")]
    NonFiniteMotifWeight {
        /// Motif holding the offending weight.
        id: MotifId,
        /// Position of the weight in the motif's weight list.
        index: usize,
        /// Offending weight.
        value: f32,
    },
    /// A distance between finite distributions exceeded the `f32` range.
    #[error("distance {value} exceeds the largest representable f32")]
    Overflow {
        /// Distance as accumulated in `f64`.
        value: f64,
    },
    /// A distance pair referenced a motif that is not in the matrix.
    #[error("distance pair references unknown motif {id}")]
    UnknownMotif {
        /// Identifier that could not be resolved.
        id: MotifId,
    },
    /// A supplied distance was negative, NaN or infinite.
    #[error("distance between {left} and {right} must be finite and non-negative (got {value})")]
    InvalidDistance {
        /// First motif of the pair.
        left: MotifId,
        /// Second motif of the pair.
        right: MotifId,
        /// Offending distance.
        value: f32,
    },
    /// The fill used for missing pairs was negative, NaN or infinite.
    #[error("missing-pair fill must be finite and non-negative (got {value})")]
    InvalidFill {
        /// Offending fill value.
        value: f32,
    },
    /// Condensed storage did not match the number of motifs.
    #[error("condensed storage for {items} motifs needs {expected} entries, got {actual}")]
    LengthMismatch {
        /// Number of motifs.
        items: usize,
        /// Required number of condensed entries.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
    /// A motif identifier appeared twice in the matrix labels.
    #[error("motif {id} labels more than one matrix row")]
    DuplicateMotif {
        /// Repeated identifier.
        id: MotifId,
    },
    /// The requested execution strategy is not compiled in.
    #[error("execution strategy {requested} is unavailable in this build")]
    BackendUnavailable {
        /// Strategy requested by the caller.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Machine-readable error codes for [`DistanceError`].
    enum DistanceErrorCode for DistanceError {
        /// A weight distribution contained NaN or an infinity.
        NonFiniteWeight => NonFiniteWeight { .. } => "DISTANCE_NON_FINITE_WEIGHT",
        /// A catalog motif carried a non-finite weight.
        NonFiniteMotifWeight => NonFiniteMotifWeight { .. } => "DISTANCE_NON_FINITE_MOTIF_WEIGHT",
        /// A distance exceeded the `f32` range.
        Overflow => Overflow { .. } => "DISTANCE_OVERFLOW",
        /// A distance pair referenced an unknown motif.
        UnknownMotif => UnknownMotif { .. } => "DISTANCE_UNKNOWN_MOTIF",
        /// A supplied distance was negative, NaN or infinite.
        InvalidDistance => InvalidDistance { .. } => "DISTANCE_INVALID_VALUE",
        /// The fill used for missing pairs was unusable.
        InvalidFill => InvalidFill { .. } => "DISTANCE_INVALID_FILL",
        /// Condensed storage did not match the number of motifs.
        LengthMismatch => LengthMismatch { .. } => "DISTANCE_LENGTH_MISMATCH",
        /// A motif identifier labelled more than one row.
        DuplicateMotif => DuplicateMotif { .. } => "DISTANCE_DUPLICATE_MOTIF",
        /// The requested execution strategy is not compiled in.
        BackendUnavailable => BackendUnavailable { .. } => "DISTANCE_BACKEND_UNAVAILABLE",
    }
}

/// Convenient alias for distance computations.
pub(crate) type Result<T> = core::result::Result<T, DistanceError>;

#[cfg(test)]
mod tests;
