//! Records emitted by the merge engine.

/// One union of two previously disjoint groups.
///
/// `left` and `right` are the representatives of the two groups immediately
/// before the union, taken from the candidate's smaller and larger item
/// respectively. The younger group is the one whose birth came later in the
/// sweep; its feature, identified by the item it started from, dies at
/// `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeEvent {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) value: f32,
    pub(crate) survivor: usize,
    pub(crate) younger: usize,
    pub(crate) younger_birth: f32,
    pub(crate) younger_feature: usize,
}

impl MergeEvent {
    /// Representative of the group holding the candidate's smaller item.
    #[rustfmt::skip]
    #[must_use]
    pub const fn left(&self) -> usize { self.left }

    /// Representative of the group holding the candidate's larger item.
    #[rustfmt::skip]
    #[must_use]
    pub const fn right(&self) -> usize { self.right }

    /// Merge value at which the groups joined.
    #[rustfmt::skip]
    #[must_use]
    pub const fn value(&self) -> f32 { self.value }

    /// Representative of the merged group.
    #[rustfmt::skip]
    #[must_use]
    pub const fn survivor(&self) -> usize { self.survivor }

    /// Representative of the group whose feature ends at this merge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn younger(&self) -> usize { self.younger }

    /// Birth value of the younger group.
    #[rustfmt::skip]
    #[must_use]
    pub const fn younger_birth(&self) -> f32 { self.younger_birth }

    /// Item the dying feature started from.
    #[rustfmt::skip]
    #[must_use]
    pub const fn younger_feature(&self) -> usize { self.younger_feature }

    /// Representative of the group whose feature continues.
    #[must_use]
    pub const fn elder(&self) -> usize {
        if self.younger == self.left {
            self.right
        } else {
            self.left
        }
    }

    /// Representative that stopped being a root at this merge.
    #[must_use]
    pub const fn absorbed(&self) -> usize {
        if self.survivor == self.left {
            self.right
        } else {
            self.left
        }
    }
}
