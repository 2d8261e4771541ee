//! Error types for the Motifold core library.
//!
//! Defines the umbrella error returned by the orchestration surface, the
//! macro every module uses to attach stable machine-readable codes to its
//! own error enum, and a convenient result alias.

use thiserror::Error;

use crate::{
    aggregate::AggregateError, distance::DistanceError, hierarchy::HierarchyError,
    merge::MergeError, motif::CatalogError, persistence::PersistenceError,
};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident
                    $( { $($pattern:tt)* } )?
                    $( ( $($tuple:tt)* ) )?
                    => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(
                        Self::$ErrVariant
                            $( { $($pattern)* } )?
                            $( ( $($tuple)* ) )?
                            => $CodeTy::$CodeVariant,
                    )+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when configuring or running [`crate::Motifold`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MotifoldError {
    /// The motif catalog handed to the pipeline contained no motifs.
    #[error("motif catalog contains no motifs")]
    EmptyCatalog,
    /// The configured fill value for missing pairwise distances is unusable.
    #[error("missing-distance fill must be finite and non-negative (got {value})")]
    InvalidFillDistance {
        /// Fill value supplied by the caller.
        value: f32,
    },
    /// Building the motif catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Computing or assembling pairwise distances failed.
    #[error(transparent)]
    Distance(#[from] DistanceError),
    /// The merge engine rejected a candidate.
    #[error(transparent)]
    Merge(#[from] MergeError),
    /// Dendrogram construction or a threshold cut failed.
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    /// Persistence extraction failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// Supernode aggregation failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

define_error_codes! {
    /// Stable codes describing [`MotifoldError`] variants.
    enum MotifoldErrorCode for MotifoldError {
        /// The motif catalog handed to the pipeline contained no motifs.
        EmptyCatalog => EmptyCatalog => "MOTIFOLD_EMPTY_CATALOG",
        /// The configured fill value for missing pairwise distances is unusable.
        InvalidFillDistance => InvalidFillDistance { .. } => "MOTIFOLD_INVALID_FILL_DISTANCE",
        /// Building the motif catalog failed.
        CatalogFailure => Catalog(..) => "MOTIFOLD_CATALOG_FAILURE",
        /// Computing or assembling pairwise distances failed.
        DistanceFailure => Distance(..) => "MOTIFOLD_DISTANCE_FAILURE",
        /// The merge engine rejected a candidate.
        MergeFailure => Merge(..) => "MOTIFOLD_MERGE_FAILURE",
        /// Dendrogram construction or a threshold cut failed.
        HierarchyFailure => Hierarchy(..) => "MOTIFOLD_HIERARCHY_FAILURE",
        /// Persistence extraction failed.
        PersistenceFailure => Persistence(..) => "MOTIFOLD_PERSISTENCE_FAILURE",
        /// Supernode aggregation failed.
        AggregateFailure => Aggregate(..) => "MOTIFOLD_AGGREGATE_FAILURE",
    }
}

impl MotifoldError {
    /// Retrieve the code of the wrapped stage error, when there is one.
    ///
    /// Lets callers log both the pipeline-level and the stage-level code
    /// without matching on every variant.
    #[must_use]
    pub const fn detail_code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyCatalog | Self::InvalidFillDistance { .. } => None,
            Self::Catalog(error) => Some(error.code().as_str()),
            Self::Distance(error) => Some(error.code().as_str()),
            Self::Merge(error) => Some(error.code().as_str()),
            Self::Hierarchy(error) => Some(error.code().as_str()),
            Self::Persistence(error) => Some(error.code().as_str()),
            Self::Aggregate(error) => Some(error.code().as_str()),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MotifoldError>;
