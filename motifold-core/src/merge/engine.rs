//! Flat-arena union-find with merge-value ordering checks.

use super::{MergeCandidate, MergeError, MergeEvent, SweepDirection};

/// Incremental connectivity over items `0..n`.
///
/// Each group tracks its size, the birth value of its oldest feature and
/// the item that feature started from. The representative follows union by
/// size while the feature follows age, so the two can differ. Merge values must advance monotonically in the engine's
/// [`SweepDirection`]; the check runs in every build.
///
/// # Examples
/// ```
/// use motifold_core::MergeEngine;
///
/// let mut engine = MergeEngine::new(3);
/// let event = engine.union(0, 1, 1.0)?.expect("disjoint groups merge");
/// assert_eq!(event.survivor(), 0);
/// assert_eq!(event.younger(), 1);
/// assert_eq!(event.younger_feature(), 1);
/// assert!(engine.union(1, 0, 1.5)?.is_none());
/// assert_eq!(engine.roots(), vec![0, 2]);
/// # Ok::<(), motifold_core::MergeError>(())
/// ```
#[derive(Clone, Debug)]
pub struct MergeEngine {
    parent: Vec<usize>,
    size: Vec<usize>,
    birth: Vec<f32>,
    feature: Vec<usize>,
    components: usize,
    direction: SweepDirection,
    last_value: Option<f32>,
}

impl MergeEngine {
    /// Creates an ascending engine of `n` singletons born at `0`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self::with_direction(vec![0.0; n], SweepDirection::Ascending)
    }

    /// Creates a descending engine of `n` singletons born at `0`.
    #[must_use]
    pub fn descending(n: usize) -> Self {
        Self::with_direction(vec![0.0; n], SweepDirection::Descending)
    }

    /// Creates an ascending engine whose singletons carry explicit births.
    ///
    /// # Errors
    /// Returns [`MergeError::NonFiniteValue`] when a birth is NaN or infinite.
    pub fn with_births(births: Vec<f32>) -> Result<Self, MergeError> {
        if let Some(&value) = births.iter().find(|birth| !birth.is_finite()) {
            return Err(MergeError::NonFiniteValue { value });
        }
        Ok(Self::with_direction(births, SweepDirection::Ascending))
    }

    fn with_direction(birth: Vec<f32>, direction: SweepDirection) -> Self {
        let n = birth.len();
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            birth,
            feature: (0..n).collect(),
            components: n,
            direction,
            last_value: None,
        }
    }

    /// Number of items in the universe.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.parent.len() }

    /// Returns `true` when the universe holds no items.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.parent.is_empty() }

    /// Number of disjoint groups.
    #[rustfmt::skip]
    #[must_use]
    pub const fn components(&self) -> usize { self.components }

    /// Order in which merge values must arrive.
    #[rustfmt::skip]
    #[must_use]
    pub const fn direction(&self) -> SweepDirection { self.direction }

    fn check_item(&self, item: usize) -> Result<(), MergeError> {
        if item < self.parent.len() {
            Ok(())
        } else {
            Err(MergeError::InvalidItem {
                item,
                universe: self.parent.len(),
            })
        }
    }

    /// Returns the representative of `item`'s group, compressing the path.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidItem`] when `item` is outside the universe.
    pub fn find(&mut self, item: usize) -> Result<usize, MergeError> {
        self.check_item(item)?;
        Ok(self.find_root(item))
    }

    fn find_root(&mut self, mut item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[item] != root {
            let next = self.parent[item];
            self.parent[item] = root;
            item = next;
        }

        root
    }

    /// Number of items in `item`'s group.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidItem`] when `item` is outside the universe.
    pub fn group_size(&mut self, item: usize) -> Result<usize, MergeError> {
        let root = self.find(item)?;
        Ok(self.size[root])
    }

    /// Birth value of the oldest feature in `item`'s group.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidItem`] when `item` is outside the universe.
    pub fn birth(&mut self, item: usize) -> Result<f32, MergeError> {
        let root = self.find(item)?;
        Ok(self.birth[root])
    }

    /// Item whose feature is the oldest in `item`'s group.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidItem`] when `item` is outside the universe.
    pub fn feature(&mut self, item: usize) -> Result<usize, MergeError> {
        let root = self.find(item)?;
        Ok(self.feature[root])
    }

    /// Joins the groups of `a` and `b` at merge value `value`.
    ///
    /// Returns `Ok(None)` when both items already share a group; the value
    /// still counts towards the ordering check. The larger group survives,
    /// with ties going to the smaller representative. The younger group is
    /// the one born later in the sweep; on equal births it is the group whose
    /// feature started from the larger item. The merged group keeps the
    /// elder's birth and feature.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidItem`] for items outside the universe,
    /// [`MergeError::NonFiniteValue`] for NaN or infinite values and
    /// [`MergeError::OrderingViolation`] when `value` goes against the sweep.
    pub fn union(&mut self, a: usize, b: usize, value: f32) -> Result<Option<MergeEvent>, MergeError> {
        self.check_item(a)?;
        self.check_item(b)?;
        if !value.is_finite() {
            return Err(MergeError::NonFiniteValue { value });
        }
        if let Some(previous) = self.last_value
            && !self.direction.admits(previous, value)
        {
            return Err(MergeError::OrderingViolation {
                previous,
                current: value,
            });
        }
        self.last_value = Some(value);

        let left = self.find_root(a);
        let right = self.find_root(b);
        if left == right {
            return Ok(None);
        }

        let survivor = match self.size[left].cmp(&self.size[right]) {
            std::cmp::Ordering::Greater => left,
            std::cmp::Ordering::Less => right,
            std::cmp::Ordering::Equal => left.min(right),
        };
        let absorbed = if survivor == left { right } else { left };

        let (left_birth, right_birth) = (self.birth[left], self.birth[right]);
        let younger = if self.direction.is_later(left_birth, right_birth) {
            right
        } else if self.direction.is_later(right_birth, left_birth) {
            left
        } else if self.feature[left] > self.feature[right] {
            left
        } else {
            right
        };
        let elder = if younger == left { right } else { left };
        let (younger_birth, younger_feature) = (self.birth[younger], self.feature[younger]);
        let (elder_birth, elder_feature) = (self.birth[elder], self.feature[elder]);

        self.parent[absorbed] = survivor;
        self.size[survivor] += self.size[absorbed];
        self.birth[survivor] = elder_birth;
        self.feature[survivor] = elder_feature;
        self.components -= 1;
        record_merge();

        Ok(Some(MergeEvent {
            left,
            right,
            value,
            survivor,
            younger,
            younger_birth,
            younger_feature,
        }))
    }

    /// Feeds `candidates` in order, collecting an event for every union.
    ///
    /// Stops early once a single group remains.
    ///
    /// # Errors
    /// Propagates the first [`MergeError`] raised by [`Self::union`].
    pub fn merge_all<I>(&mut self, candidates: I) -> Result<Vec<MergeEvent>, MergeError>
    where
        I: IntoIterator<Item = MergeCandidate>,
    {
        let mut events = Vec::with_capacity(self.components.saturating_sub(1));
        for candidate in candidates {
            if self.components <= 1 {
                break;
            }
            let (low, high) = candidate.items();
            if let Some(event) = self.union(low, high, candidate.value())? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Current representatives, ascending.
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        (0..self.parent.len())
            .filter(|&item| self.parent[item] == item)
            .collect()
    }

    /// Representative of every item, in item order.
    #[must_use]
    pub fn representatives(&mut self) -> Vec<usize> {
        (0..self.parent.len())
            .map(|item| self.find_root(item))
            .collect()
    }
}

#[cfg(feature = "metrics")]
fn record_merge() {
    metrics::counter!("motifold_merge_events_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_merge() {}
