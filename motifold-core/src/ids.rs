//! Identifier newtypes shared across the pipeline.
//!
//! Motifs, graph nodes and clusters are all keyed by integers upstream; the
//! newtypes keep them from being mixed up once they flow through the merge
//! engine, which itself only speaks dense `usize` indices.

use core::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            #[doc = concat!("Creates a new [`", stringify!($name), "`].")]
            #[rustfmt::skip]
            #[must_use]
            pub const fn new(id: u64) -> Self { Self(id) }

            /// Returns the underlying numeric identifier.
            #[rustfmt::skip]
            #[must_use]
            pub const fn get(self) -> u64 { self.0 }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a motif in the catalog.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::MotifId;
    ///
    /// let id = MotifId::new(4);
    /// assert_eq!(id.get(), 4);
    /// assert_eq!(id.to_string(), "motif_4");
    /// ```
    MotifId, "motif_"
}

define_id! {
    /// Identifier of a node in the underlying weighted graph.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::NodeId;
    ///
    /// assert_eq!(NodeId::new(12).get(), 12);
    /// ```
    NodeId, "node_"
}

define_id! {
    /// Identifier assigned to a cluster in a [`crate::Partition`].
    ///
    /// Cluster identifiers within one partition are contiguous from zero.
    ///
    /// # Examples
    /// ```
    /// use motifold_core::ClusterId;
    ///
    /// let id = ClusterId::new(2);
    /// assert_eq!(id.get(), 2);
    /// ```
    ClusterId, "cluster_"
}
