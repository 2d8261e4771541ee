//! Persistence pairs and the diagram that collects them.

use crate::ids::NodeId;

/// Lifetime of one connected component in a filtration.
///
/// `feature` is the node whose component the pair describes: the node the
/// younger component started from for a finite pair, the eldest node of the
/// surviving component for an essential one. Each vertex of the filtration
/// names exactly one pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersistencePair {
    birth: f32,
    death: f32,
    feature: NodeId,
}

impl PersistencePair {
    pub(crate) const fn new(birth: f32, death: f32, feature: NodeId) -> Self {
        Self {
            birth,
            death,
            feature,
        }
    }

    #[rustfmt::skip]
    #[must_use]
    pub const fn birth(&self) -> f32 { self.birth }

    /// Death value; infinite for components that never die.
    #[rustfmt::skip]
    #[must_use]
    pub const fn death(&self) -> f32 { self.death }

    #[rustfmt::skip]
    #[must_use]
    pub const fn feature(&self) -> NodeId { self.feature }

    /// Returns `true` for a component alive at the end of the filtration.
    #[must_use]
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }

    /// `death - birth`; infinite for essential pairs.
    #[must_use]
    pub fn persistence(&self) -> f32 {
        self.death - self.birth
    }
}

/// Zero-dimensional persistence diagram.
///
/// Finite pairs come first in order of death, then essential pairs in
/// ascending node order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistenceDiagram {
    pairs: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    pub(crate) fn new(pairs: Vec<PersistencePair>) -> Self {
        Self { pairs }
    }

    #[rustfmt::skip]
    #[must_use]
    pub fn pairs(&self) -> &[PersistencePair] { &self.pairs }

    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.pairs.len() }

    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    /// Pairs with a finite death.
    pub fn finite(&self) -> impl Iterator<Item = &PersistencePair> + '_ {
        self.pairs.iter().filter(|pair| !pair.is_essential())
    }

    /// Pairs that never die.
    pub fn essential(&self) -> impl Iterator<Item = &PersistencePair> + '_ {
        self.pairs.iter().filter(|pair| pair.is_essential())
    }

    /// Number of connected components at the end of the filtration.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.essential().count()
    }

    /// Sum of finite persistences, accumulated in `f64`.
    #[must_use]
    pub fn total_persistence(&self) -> f64 {
        self.finite()
            .map(|pair| f64::from(pair.persistence()))
            .sum()
    }

    /// Largest finite death, or `None` when every pair is essential.
    #[must_use]
    pub fn max_death(&self) -> Option<f32> {
        self.finite().map(PersistencePair::death).reduce(f32::max)
    }
}
