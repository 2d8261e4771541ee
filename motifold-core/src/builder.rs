//! Builder utilities for configuring Motifold orchestration.
//!
//! Exposes the execution strategy selection surface and builder validation
//! used before constructing [`Motifold`] instances.

use core::fmt;

use crate::{
    Result,
    aggregate::ClusterConnectivity,
    distance::DistanceError,
    error::MotifoldError,
    hierarchy::Linkage,
    motif::WeightProfile,
    motifold::Motifold,
};

/// Catalogs at least this large run pairwise distances on rayon under
/// [`ExecutionStrategy::Auto`].
#[cfg(feature = "parallel")]
pub(crate) const AUTO_PARALLEL_THRESHOLD: usize = 64;

/// Indicates how pairwise distances are scheduled.
///
/// `Auto` resolves deterministically: catalogs of 64 motifs or more run in
/// parallel when the `parallel` feature is compiled in and sequentially
/// otherwise.
///
/// # Examples
/// ```
/// use motifold_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
/// assert_eq!(ExecutionStrategy::Sequential.to_string(), "sequential");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Let the library choose based on input size and compiled features.
    #[default]
    Auto,
    /// Compute on the calling thread.
    Sequential,
    /// Compute on the rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Returns `true` when `items` inputs should be processed on rayon.
    ///
    /// # Errors
    /// Returns [`DistanceError::BackendUnavailable`] when `Parallel` is
    /// requested from a build without the `parallel` feature.
    pub(crate) fn runs_parallel(self, items: usize) -> core::result::Result<bool, DistanceError> {
        match self {
            Self::Sequential => Ok(false),
            #[cfg(feature = "parallel")]
            Self::Auto => Ok(items >= AUTO_PARALLEL_THRESHOLD),
            #[cfg(not(feature = "parallel"))]
            Self::Auto => {
                let _ = items;
                Ok(false)
            }
            #[cfg(feature = "parallel")]
            Self::Parallel => Ok(true),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(DistanceError::BackendUnavailable {
                requested: Self::Parallel,
            }),
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Sequential => f.write_str("sequential"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// Configures and constructs [`Motifold`] instances.
///
/// # Examples
/// ```
/// use motifold_core::{ExecutionStrategy, Linkage, MotifoldBuilder};
///
/// let motifold = MotifoldBuilder::new()
///     .with_linkage(Linkage::Single)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(motifold.linkage(), Linkage::Single);
/// assert_eq!(motifold.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct MotifoldBuilder {
    linkage: Linkage,
    weight_profile: WeightProfile,
    execution_strategy: ExecutionStrategy,
    missing_distance: f32,
    connectivity: ClusterConnectivity,
}

impl Default for MotifoldBuilder {
    fn default() -> Self {
        Self {
            linkage: Linkage::Average,
            weight_profile: WeightProfile::All,
            execution_strategy: ExecutionStrategy::Auto,
            missing_distance: 100.0,
            connectivity: ClusterConnectivity::SplitDisconnected,
        }
    }
}

impl MotifoldBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{Linkage, MotifoldBuilder, WeightProfile};
    ///
    /// let builder = MotifoldBuilder::new();
    /// assert_eq!(builder.linkage(), Linkage::Average);
    /// assert_eq!(builder.weight_profile(), WeightProfile::All);
    /// assert_eq!(builder.missing_distance(), 100.0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the linkage used to build the dendrogram.
    #[must_use]
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    #[must_use]
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Selects which motif edges feed the weight distributions.
    #[must_use]
    pub fn with_weight_profile(mut self, profile: WeightProfile) -> Self {
        self.weight_profile = profile;
        self
    }

    #[must_use]
    pub fn weight_profile(&self) -> WeightProfile {
        self.weight_profile
    }

    /// Sets the execution strategy used for pairwise distances.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{ExecutionStrategy, MotifoldBuilder};
    ///
    /// let builder = MotifoldBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Sets the distance assumed for motif pairs missing from a supplied
    /// distance list.
    #[must_use]
    pub fn with_missing_distance(mut self, value: f32) -> Self {
        self.missing_distance = value;
        self
    }

    #[must_use]
    pub fn missing_distance(&self) -> f32 {
        self.missing_distance
    }

    /// Chooses whether clusters are split along graph connectivity before
    /// aggregation.
    #[must_use]
    pub fn with_connectivity(mut self, connectivity: ClusterConnectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    #[must_use]
    pub fn connectivity(&self) -> ClusterConnectivity {
        self.connectivity
    }

    /// Validates the configuration and constructs a [`Motifold`] instance.
    ///
    /// # Errors
    /// Returns [`MotifoldError::InvalidFillDistance`] when the missing-pair
    /// distance is negative, NaN or infinite.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{MotifoldBuilder, MotifoldErrorCode};
    ///
    /// let err = MotifoldBuilder::new()
    ///     .with_missing_distance(f32::NAN)
    ///     .build()
    ///     .expect_err("NaN fill is rejected");
    /// assert_eq!(err.code(), MotifoldErrorCode::InvalidFillDistance);
    /// ```
    pub fn build(self) -> Result<Motifold> {
        if !self.missing_distance.is_finite() || self.missing_distance < 0.0 {
            return Err(MotifoldError::InvalidFillDistance {
                value: self.missing_distance,
            });
        }
        Ok(Motifold::new(
            self.linkage,
            self.weight_profile,
            self.execution_strategy,
            self.missing_distance,
            self.connectivity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::negative(-1.0)]
    #[case::nan(f32::NAN)]
    #[case::infinite(f32::INFINITY)]
    fn build_rejects_unusable_fill(#[case] value: f32) {
        let err = MotifoldBuilder::new()
            .with_missing_distance(value)
            .build()
            .expect_err("fill must be rejected");
        assert!(matches!(err, MotifoldError::InvalidFillDistance { .. }));
        assert_eq!(err.detail_code(), None);
    }

    #[test]
    fn build_carries_every_setting() {
        let motifold = MotifoldBuilder::new()
            .with_linkage(Linkage::Single)
            .with_weight_profile(WeightProfile::InternalOnly)
            .with_missing_distance(0.0)
            .with_connectivity(ClusterConnectivity::AsIs)
            .build()
            .expect("configuration is valid");
        assert_eq!(motifold.linkage(), Linkage::Single);
        assert_eq!(motifold.weight_profile(), WeightProfile::InternalOnly);
        assert_eq!(motifold.missing_distance(), 0.0);
        assert_eq!(motifold.connectivity(), ClusterConnectivity::AsIs);
    }

    #[rstest]
    #[case::small(ExecutionStrategy::Auto, 3, false)]
    #[case::sequential(ExecutionStrategy::Sequential, 1_000, false)]
    fn strategy_resolution(
        #[case] strategy: ExecutionStrategy,
        #[case] items: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(strategy.runs_parallel(items), Ok(expected));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn auto_goes_parallel_for_large_inputs() {
        assert_eq!(
            ExecutionStrategy::Auto.runs_parallel(AUTO_PARALLEL_THRESHOLD),
            Ok(true)
        );
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_is_unavailable_without_the_feature() {
        let err = ExecutionStrategy::Parallel
            .runs_parallel(1)
            .expect_err("parallel backend is not compiled in");
        assert_eq!(err.code().as_str(), "DISTANCE_BACKEND_UNAVAILABLE");
    }
}
