//! 1-Wasserstein distance between edge-weight distributions.

use std::iter;

use super::{DistanceError, Result, Side};
use crate::motif::{Motif, WeightProfile};

/// Weight distribution validated as finite and sorted ascending.
///
/// Sorting once lets the distance matrix compare every pair without
/// re-sorting either side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedProfile {
    weights: Vec<f32>,
    negatives: usize,
}

impl SortedProfile {
    /// Validates and sorts `weights`.
    ///
    /// # Errors
    /// Returns [`DistanceError::NonFiniteWeight`] when a weight is NaN or
    /// infinite; `which` labels the argument in the error.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{Side, SortedProfile};
    ///
    /// let profile = SortedProfile::new(&[3.0, 1.0, 2.0], Side::Left)?;
    /// assert_eq!(profile.weights(), &[1.0, 2.0, 3.0]);
    /// # Ok::<(), motifold_core::DistanceError>(())
    /// ```
    pub fn new(weights: &[f32], which: Side) -> Result<Self> {
        if let Some((index, &value)) = weights
            .iter()
            .enumerate()
            .find(|(_, weight)| !weight.is_finite())
        {
            return Err(DistanceError::NonFiniteWeight {
                which,
                index,
                value,
            });
        }
        let mut weights = weights.to_vec();
        weights.sort_unstable_by(f32::total_cmp);
        let negatives = weights.partition_point(|&weight| weight < 0.0);
        Ok(Self { weights, negatives })
    }

    /// Weights in ascending order.
    #[rustfmt::skip]
    #[must_use]
    pub fn weights(&self) -> &[f32] { &self.weights }

    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.weights.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    /// Order statistics of the distribution padded with zeros to `len`.
    ///
    /// The zeros land between the negative and non-negative weights, so the
    /// padded sequence stays sorted.
    fn padded(&self, len: usize) -> impl Iterator<Item = f32> + '_ {
        let (negative, rest) = self.weights.split_at(self.negatives);
        negative
            .iter()
            .copied()
            .chain(iter::repeat_n(0.0, len.saturating_sub(self.weights.len())))
            .chain(rest.iter().copied())
    }

    /// 1-Wasserstein distance to `other`.
    ///
    /// The shorter distribution is padded with zero weights and absolute
    /// differences of matching order statistics are summed in `f64`.
    ///
    /// # Errors
    /// Returns [`DistanceError::Overflow`] when the sum does not fit in an
    /// `f32`.
    pub fn distance(&self, other: &Self) -> Result<f32> {
        let sum = self.distance_sum(other);
        let distance = sum as f32;
        if distance.is_finite() {
            Ok(distance)
        } else {
            Err(DistanceError::Overflow { value: sum })
        }
    }

    pub(super) fn distance_sum(&self, other: &Self) -> f64 {
        let len = self.len().max(other.len());
        self.padded(len)
            .zip(other.padded(len))
            .map(|(left, right)| (f64::from(left) - f64::from(right)).abs())
            .sum()
    }
}

/// Computes the 1-Wasserstein distance between two weight lists.
///
/// Empty lists compare as all-zero distributions.
///
/// # Examples
/// ```
/// use motifold_core::wasserstein_distance;
///
/// assert_eq!(wasserstein_distance(&[1.0, 3.0], &[3.0, 1.0])?, 0.0);
/// assert_eq!(wasserstein_distance(&[2.0], &[1.0, 2.0])?, 1.0);
/// assert_eq!(wasserstein_distance(&[], &[])?, 0.0);
/// # Ok::<(), motifold_core::DistanceError>(())
/// ```
///
/// # Errors
/// Returns [`DistanceError::NonFiniteWeight`] when either list contains NaN
/// or an infinity and [`DistanceError::Overflow`] when the distance does not
/// fit in an `f32`.
pub fn wasserstein_distance(left: &[f32], right: &[f32]) -> Result<f32> {
    let left = SortedProfile::new(left, Side::Left)?;
    let right = SortedProfile::new(right, Side::Right)?;
    left.distance(&right)
}

/// Computes the distance between two motifs' weight distributions.
///
/// # Errors
/// Returns [`DistanceError::NonFiniteWeight`] when either motif carries a
/// non-finite weight admitted by `profile` and [`DistanceError::Overflow`]
/// when the distance does not fit in an `f32`.
pub fn motif_distance(left: &Motif, right: &Motif, profile: WeightProfile) -> Result<f32> {
    wasserstein_distance(&left.weights(profile), &right.weights(profile))
}
