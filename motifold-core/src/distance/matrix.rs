//! Condensed pairwise distance matrix over catalog indices.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::{DistanceError, Result, Side, SortedProfile};
use crate::{
    builder::ExecutionStrategy,
    ids::MotifId,
    motif::{MotifCatalog, WeightProfile},
};

/// Symmetric distance matrix stored as its strict upper triangle.
///
/// Row `i` of the matrix belongs to `ids()[i]`; the diagonal is zero and is
/// not stored.
///
/// # Examples
/// ```
/// use motifold_core::{DistanceMatrix, MotifId};
///
/// let ids = vec![MotifId::new(1), MotifId::new(2), MotifId::new(3)];
/// let matrix = DistanceMatrix::from_condensed(ids, vec![1.0, 2.0, 3.0])?;
/// assert_eq!(matrix.get(2, 0), Some(2.0));
/// assert_eq!(matrix.distance(MotifId::new(2), MotifId::new(3)), Some(3.0));
/// assert_eq!(matrix.get(1, 1), Some(0.0));
/// # Ok::<(), motifold_core::DistanceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<MotifId>,
    lookup: Vec<(MotifId, usize)>,
    condensed: Vec<f32>,
}

const fn condensed_len(items: usize) -> usize {
    items * items.saturating_sub(1) / 2
}

impl DistanceMatrix {
    fn index_ids(ids: &[MotifId]) -> Result<Vec<(MotifId, usize)>> {
        let mut lookup: Vec<(MotifId, usize)> =
            ids.iter().enumerate().map(|(index, &id)| (id, index)).collect();
        lookup.sort_unstable();
        if let Some(pair) = lookup.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(DistanceError::DuplicateMotif { id: pair[0].0 });
        }
        Ok(lookup)
    }

    fn check_distance(left: MotifId, right: MotifId, value: f32) -> Result<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(DistanceError::InvalidDistance { left, right, value })
        }
    }

    /// Builds a matrix from condensed upper-triangle storage in row-major
    /// order.
    ///
    /// # Errors
    /// Returns [`DistanceError::LengthMismatch`] when `condensed` does not
    /// hold `n(n-1)/2` entries, [`DistanceError::DuplicateMotif`] when an id
    /// repeats and [`DistanceError::InvalidDistance`] for negative or
    /// non-finite entries.
    pub fn from_condensed(ids: Vec<MotifId>, condensed: Vec<f32>) -> Result<Self> {
        let expected = condensed_len(ids.len());
        if condensed.len() != expected {
            return Err(DistanceError::LengthMismatch {
                items: ids.len(),
                expected,
                actual: condensed.len(),
            });
        }
        let lookup = Self::index_ids(&ids)?;
        let matrix = Self {
            ids,
            lookup,
            condensed,
        };
        for (i, j, value) in matrix.pairs() {
            Self::check_distance(matrix.ids[i], matrix.ids[j], value)?;
        }
        Ok(matrix)
    }

    /// Builds a matrix from a sparse list of `(left, right, distance)` pairs.
    ///
    /// Pairs absent from the list take `fill`. A pair listed more than once
    /// keeps its last distance; self-pairs are ignored.
    ///
    /// # Errors
    /// Returns [`DistanceError::InvalidFill`] for an unusable `fill`,
    /// [`DistanceError::UnknownMotif`] when a pair names an id outside `ids`,
    /// [`DistanceError::DuplicateMotif`] when an id repeats and
    /// [`DistanceError::InvalidDistance`] for negative or non-finite
    /// distances.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::{DistanceMatrix, MotifId};
    ///
    /// let (a, b, c) = (MotifId::new(10), MotifId::new(20), MotifId::new(30));
    /// let matrix = DistanceMatrix::from_pairs(vec![a, b, c], [(b, a, 0.5)], 100.0)?;
    /// assert_eq!(matrix.distance(a, b), Some(0.5));
    /// assert_eq!(matrix.distance(a, c), Some(100.0));
    /// # Ok::<(), motifold_core::DistanceError>(())
    /// ```
    pub fn from_pairs<I>(ids: Vec<MotifId>, pairs: I, fill: f32) -> Result<Self>
    where
        I: IntoIterator<Item = (MotifId, MotifId, f32)>,
    {
        if !fill.is_finite() || fill < 0.0 {
            return Err(DistanceError::InvalidFill { value: fill });
        }
        let lookup = Self::index_ids(&ids)?;
        let mut matrix = Self {
            condensed: vec![fill; condensed_len(ids.len())],
            ids,
            lookup,
        };
        for (left, right, value) in pairs {
            let i = matrix
                .index_of(left)
                .ok_or(DistanceError::UnknownMotif { id: left })?;
            let j = matrix
                .index_of(right)
                .ok_or(DistanceError::UnknownMotif { id: right })?;
            Self::check_distance(left, right, value)?;
            if let Some(slot) = matrix.slot(i, j) {
                matrix.condensed[slot] = value;
            }
        }
        Ok(matrix)
    }

    /// Number of rows.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.ids.len() }

    /// Returns `true` when the matrix has no rows.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Row labels in index order.
    #[rustfmt::skip]
    #[must_use]
    pub fn ids(&self) -> &[MotifId] { &self.ids }

    /// Upper-triangle entries in row-major order.
    #[rustfmt::skip]
    #[must_use]
    pub fn condensed(&self) -> &[f32] { &self.condensed }

    /// Row index of `id`.
    #[must_use]
    pub fn index_of(&self, id: MotifId) -> Option<usize> {
        self.lookup
            .binary_search_by_key(&id, |&(key, _)| key)
            .ok()
            .map(|position| self.lookup[position].1)
    }

    fn slot(&self, i: usize, j: usize) -> Option<usize> {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let n = self.ids.len();
        (i != j && j < n).then(|| i * n - i * (i + 1) / 2 + (j - i - 1))
    }

    /// Distance between rows `i` and `j`; `None` when either is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        if i == j {
            return (i < self.ids.len()).then_some(0.0);
        }
        self.slot(i, j).map(|slot| self.condensed[slot])
    }

    /// Distance between two motifs by identifier.
    #[must_use]
    pub fn distance(&self, left: MotifId, right: MotifId) -> Option<f32> {
        self.get(self.index_of(left)?, self.index_of(right)?)
    }

    /// Every `(i, j, distance)` with `i < j`, in row-major order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let n = self.ids.len();
        (0..n)
            .flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
            .zip(self.condensed.iter().copied())
            .map(|((i, j), value)| (i, j, value))
    }

    /// Largest off-diagonal distance, or `0` for fewer than two rows.
    #[must_use]
    pub fn max_distance(&self) -> f32 {
        self.condensed.iter().copied().fold(0.0, f32::max)
    }
}

// Overflowing sums become infinite here and are rejected by `from_condensed`
// together with the motifs that produced them.
fn profile_row(profiles: &[SortedProfile], i: usize) -> Vec<f32> {
    let left = &profiles[i];
    profiles[i + 1..]
        .iter()
        .map(|right| left.distance_sum(right) as f32)
        .collect()
}

/// Computes all pairwise motif distances for `catalog`.
///
/// Row `i` of the result is catalog index `i`. Pairs are independent, so
/// rows run on rayon when `strategy` resolves to parallel execution.
///
/// # Errors
/// Returns [`DistanceError::NonFiniteMotifWeight`] when a motif carries a
/// non-finite weight, [`DistanceError::InvalidDistance`] naming both motifs
/// when a distance does not fit in an `f32` and
/// [`DistanceError::BackendUnavailable`] when [`ExecutionStrategy::Parallel`]
/// is requested without the `parallel` feature.
#[instrument(
    name = "core.distance_matrix",
    err,
    skip(catalog),
    fields(items = catalog.len(), profile = ?profile, strategy = %strategy),
)]
pub fn compute_distance_matrix(
    catalog: &MotifCatalog,
    profile: WeightProfile,
    strategy: ExecutionStrategy,
) -> Result<DistanceMatrix> {
    let n = catalog.len();
    let parallel = strategy.runs_parallel(n)?;
    let profiles = catalog
        .motifs()
        .iter()
        .map(|motif| {
            SortedProfile::new(&motif.weights(profile), Side::Left).map_err(|err| match err {
                DistanceError::NonFiniteWeight { index, value, .. } => {
                    DistanceError::NonFiniteMotifWeight {
                        id: motif.id(),
                        index,
                        value,
                    }
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let rows: Vec<Vec<f32>> = if parallel {
        parallel_rows(&profiles)
    } else {
        (0..n).map(|i| profile_row(&profiles, i)).collect()
    };
    let condensed = rows.concat();
    debug!(pairs = condensed.len(), parallel, "pairwise distances computed");

    DistanceMatrix::from_condensed(catalog.ids(), condensed)
}

#[cfg(feature = "parallel")]
fn parallel_rows(profiles: &[SortedProfile]) -> Vec<Vec<f32>> {
    (0..profiles.len())
        .into_par_iter()
        .map(|i| profile_row(profiles, i))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn parallel_rows(profiles: &[SortedProfile]) -> Vec<Vec<f32>> {
    (0..profiles.len()).map(|i| profile_row(profiles, i)).collect()
}
