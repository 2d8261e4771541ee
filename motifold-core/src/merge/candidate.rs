//! Merge candidates and the order in which the engine accepts them.

use std::cmp::Ordering;

/// Direction in which merge values advance.
///
/// Ascending sweeps drive agglomerative clustering and sublevel
/// filtrations; descending sweeps build maximum spanning forests.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SweepDirection {
    /// Merge values never decrease.
    #[default]
    Ascending,
    /// Merge values never increase.
    Descending,
}

impl SweepDirection {
    /// Returns `true` when `current` may follow `previous` in this sweep.
    pub(crate) fn admits(self, previous: f32, current: f32) -> bool {
        match self {
            Self::Ascending => previous <= current,
            Self::Descending => previous >= current,
        }
    }

    /// Returns `true` when `later` is strictly further along the sweep than
    /// `earlier`.
    pub(crate) fn is_later(self, earlier: f32, later: f32) -> bool {
        match self {
            Self::Ascending => later > earlier,
            Self::Descending => later < earlier,
        }
    }
}

/// A proposed union of two items at a given merge value.
///
/// The endpoints are stored canonically (`low <= high`). Candidates order by
/// value using [`f32::total_cmp`], then by the smaller item, then by the
/// larger one, so sorting a candidate list is deterministic.
///
/// # Examples
/// ```
/// use motifold_core::MergeCandidate;
///
/// let mut candidates = vec![
///     MergeCandidate::new(3, 1, 0.5),
///     MergeCandidate::new(0, 2, 0.5),
///     MergeCandidate::new(1, 2, 0.25),
/// ];
/// candidates.sort_unstable();
/// assert_eq!(candidates[0].items(), (1, 2));
/// assert_eq!(candidates[1].items(), (0, 2));
/// assert_eq!(candidates[2].items(), (1, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeCandidate {
    low: usize,
    high: usize,
    value: f32,
}

impl MergeCandidate {
    /// Creates a candidate joining `left` and `right` at `value`.
    #[must_use]
    pub fn new(left: usize, right: usize, value: f32) -> Self {
        let (low, high) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        Self { low, high, value }
    }

    /// Returns the endpoints as `(smaller, larger)`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn items(&self) -> (usize, usize) { (self.low, self.high) }

    /// Returns the merge value.
    #[rustfmt::skip]
    #[must_use]
    pub const fn value(&self) -> f32 { self.value }
}

impl Eq for MergeCandidate {}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.low.cmp(&other.low))
            .then_with(|| self.high.cmp(&other.high))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
