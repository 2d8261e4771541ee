//! Supernode statistics.

use super::AggregateError;
use crate::{
    hierarchy::Partition,
    ids::{ClusterId, MotifId},
    motif::MotifCatalog,
};

/// One cluster of a partition with summary statistics over its motifs.
#[derive(Clone, Debug, PartialEq)]
pub struct Supernode {
    cluster: ClusterId,
    representative: MotifId,
    members: Vec<MotifId>,
    mean_size: f64,
    size_variance: f64,
}

impl Supernode {
    #[rustfmt::skip]
    #[must_use]
    pub const fn cluster(&self) -> ClusterId { self.cluster }

    /// Smallest member id.
    #[rustfmt::skip]
    #[must_use]
    pub const fn representative(&self) -> MotifId { self.representative }

    /// Member ids, ascending.
    #[rustfmt::skip]
    #[must_use]
    pub fn members(&self) -> &[MotifId] { &self.members }

    #[rustfmt::skip]
    #[must_use]
    pub fn member_count(&self) -> usize { self.members.len() }

    /// Mean motif size (neighbour count) over members.
    #[rustfmt::skip]
    #[must_use]
    pub const fn mean_size(&self) -> f64 { self.mean_size }

    /// Population variance of member motif sizes.
    #[rustfmt::skip]
    #[must_use]
    pub const fn size_variance(&self) -> f64 { self.size_variance }
}

/// Builds one supernode per cluster of `partition`, ordered by cluster id.
///
/// # Examples
/// ```
/// use motifold_core::{ClusterId, Motif, MotifCatalog, MotifId, NodeId, Partition, aggregate};
///
/// let catalog = MotifCatalog::new(vec![
///     Motif::from_source(NodeId::new(4), vec![NodeId::new(5)], vec![]),
///     Motif::from_source(NodeId::new(2), vec![NodeId::new(5), NodeId::new(6), NodeId::new(7)], vec![]),
/// ])?;
/// let partition = Partition::try_new(
///     vec![MotifId::new(2), MotifId::new(4)],
///     vec![ClusterId::new(0), ClusterId::new(0)],
/// )?;
/// let supernodes = aggregate(&partition, &catalog)?;
/// assert_eq!(supernodes[0].representative(), MotifId::new(2));
/// assert_eq!(supernodes[0].mean_size(), 2.0);
/// assert_eq!(supernodes[0].size_variance(), 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
/// Returns [`AggregateError::UnknownMotif`] when the partition names a motif
/// missing from `catalog`.
pub fn aggregate(
    partition: &Partition,
    catalog: &MotifCatalog,
) -> Result<Vec<Supernode>, AggregateError> {
    partition
        .classes()
        .into_iter()
        .enumerate()
        .map(|(cluster, mut members)| {
            members.sort_unstable();
            let sizes = members
                .iter()
                .map(|&id| {
                    catalog
                        .by_id(id)
                        .map(|motif| motif.size() as f64)
                        .ok_or(AggregateError::UnknownMotif { id })
                })
                .collect::<Result<Vec<f64>, _>>()?;
            let count = sizes.len() as f64;
            let mean_size = sizes.iter().sum::<f64>() / count;
            let size_variance = sizes
                .iter()
                .map(|size| (size - mean_size).powi(2))
                .sum::<f64>()
                / count;
            Ok(Supernode {
                cluster: ClusterId::new(cluster as u64),
                representative: members[0],
                members,
                mean_size,
                size_variance,
            })
        })
        .collect()
}
