//! Motif summarisation orchestration for the Motifold library.
//!
//! Provides the [`Motifold`] runtime entry point, which turns a motif catalog
//! into an immutable [`MotifSummary`] that answers threshold queries.

use tracing::{info, instrument, warn};

use crate::{
    Result,
    aggregate::{
        ClusterConnectivity, ClusterSubgraph, CompressedGraph, MotifPattern, Supernode,
        aggregate, cluster_subgraph, compress_graph, split_disconnected, unique_patterns,
    },
    builder::ExecutionStrategy,
    distance::{DistanceMatrix, compute_distance_matrix},
    error::MotifoldError,
    hierarchy::{Dendrogram, Linkage, Partition, build_dendrogram},
    ids::{ClusterId, MotifId},
    motif::{MotifCatalog, WeightProfile, WeightedEdge},
};

/// Entry point for summarising a motif catalog.
///
/// # Examples
/// ```
/// use motifold_core::{Motif, MotifCatalog, MotifoldBuilder, NodeId};
///
/// let catalog = MotifCatalog::new(vec![
///     Motif::from_source(NodeId::new(1), vec![], vec![]),
///     Motif::from_source(NodeId::new(2), vec![], vec![]),
/// ])?;
/// let motifold = MotifoldBuilder::new().build()?;
/// let summary = motifold.summarize(catalog)?;
/// assert_eq!(summary.dendrogram().events().len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Motifold {
    linkage: Linkage,
    weight_profile: WeightProfile,
    execution_strategy: ExecutionStrategy,
    missing_distance: f32,
    connectivity: ClusterConnectivity,
}

impl Motifold {
    pub(crate) fn new(
        linkage: Linkage,
        weight_profile: WeightProfile,
        execution_strategy: ExecutionStrategy,
        missing_distance: f32,
        connectivity: ClusterConnectivity,
    ) -> Self {
        Self {
            linkage,
            weight_profile,
            execution_strategy,
            missing_distance,
            connectivity,
        }
    }

    /// Linkage used to build dendrograms.
    #[must_use]
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Which motif edges feed the distance profiles.
    #[must_use]
    pub fn weight_profile(&self) -> WeightProfile {
        self.weight_profile
    }

    /// Whether distance rows run sequentially or on the rayon pool.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Distance assumed for pairs absent from precomputed input.
    #[must_use]
    pub fn missing_distance(&self) -> f32 {
        self.missing_distance
    }

    /// Connectivity rule applied by [`MotifSummary::clusters_at`].
    #[must_use]
    pub fn connectivity(&self) -> ClusterConnectivity {
        self.connectivity
    }

    /// Computes pairwise motif distances and builds the dendrogram.
    ///
    /// # Errors
    /// Returns [`MotifoldError::EmptyCatalog`] for an empty catalog,
    /// [`MotifoldError::Distance`] when distances cannot be computed and
    /// [`MotifoldError::Hierarchy`] when the dendrogram cannot be built.
    #[instrument(
        name = "core.summarize",
        err,
        skip(self, catalog),
        fields(
            motifs = catalog.len(),
            linkage = %self.linkage,
            strategy = %self.execution_strategy,
        ),
    )]
    pub fn summarize(&self, catalog: MotifCatalog) -> Result<MotifSummary> {
        Self::ensure_non_empty(&catalog)?;
        let matrix = compute_distance_matrix(&catalog, self.weight_profile, self.execution_strategy)?;
        self.finish(catalog, matrix)
    }

    /// Builds the dendrogram from precomputed motif distances.
    ///
    /// Pairs absent from `pairs` take the configured missing distance.
    ///
    /// # Errors
    /// Returns [`MotifoldError::EmptyCatalog`] for an empty catalog,
    /// [`MotifoldError::Distance`] when a pair is invalid or names an unknown
    /// motif and [`MotifoldError::Hierarchy`] when the dendrogram cannot be
    /// built.
    #[instrument(
        name = "core.summarize_with_distances",
        err,
        skip(self, catalog, pairs),
        fields(motifs = catalog.len(), linkage = %self.linkage),
    )]
    pub fn summarize_with_distances<I>(
        &self,
        catalog: MotifCatalog,
        pairs: I,
    ) -> Result<MotifSummary>
    where
        I: IntoIterator<Item = (MotifId, MotifId, f32)>,
    {
        Self::ensure_non_empty(&catalog)?;
        let matrix = DistanceMatrix::from_pairs(catalog.ids(), pairs, self.missing_distance)?;
        self.finish(catalog, matrix)
    }

    fn ensure_non_empty(catalog: &MotifCatalog) -> Result<()> {
        if catalog.is_empty() {
            warn!("motif catalog is empty, returning error");
            return Err(MotifoldError::EmptyCatalog);
        }
        Ok(())
    }

    fn finish(&self, catalog: MotifCatalog, matrix: DistanceMatrix) -> Result<MotifSummary> {
        let dendrogram = build_dendrogram(&matrix, self.linkage)?;
        info!(
            motifs = catalog.len(),
            merges = dendrogram.events().len(),
            max_merge = ?dendrogram.max_merge_value(),
            "motif summary ready"
        );
        let graph_edges = catalog.graph_edges();
        Ok(MotifSummary {
            catalog,
            matrix,
            dendrogram,
            graph_edges,
            connectivity: self.connectivity,
        })
    }
}

/// How much a threshold cut compresses the catalog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionStats {
    motifs: usize,
    supernodes: usize,
}

impl CompressionStats {
    /// Number of motifs before compression.
    #[rustfmt::skip]
    #[must_use]
    pub const fn motifs(&self) -> usize { self.motifs }

    /// Number of supernodes after compression.
    #[rustfmt::skip]
    #[must_use]
    pub const fn supernodes(&self) -> usize { self.supernodes }

    /// Percentage reduction, rounded to one decimal place.
    #[must_use]
    pub fn compression_percent(&self) -> f64 {
        if self.motifs == 0 {
            return 0.0;
        }
        let ratio = 1.0 - self.supernodes as f64 / self.motifs as f64;
        (ratio * 1000.0).round() / 10.0
    }
}

/// Immutable result of [`Motifold::summarize`].
///
/// Every query builds fresh state, so one summary can serve many threshold
/// queries concurrently.
#[derive(Clone, Debug)]
pub struct MotifSummary {
    catalog: MotifCatalog,
    matrix: DistanceMatrix,
    dendrogram: Dendrogram,
    graph_edges: Vec<WeightedEdge>,
    connectivity: ClusterConnectivity,
}

impl MotifSummary {
    /// Catalog the summary was built from.
    #[rustfmt::skip]
    #[must_use]
    pub fn catalog(&self) -> &MotifCatalog { &self.catalog }

    /// Pairwise motif distances.
    #[rustfmt::skip]
    #[must_use]
    pub fn matrix(&self) -> &DistanceMatrix { &self.matrix }

    /// Merge history over the catalog.
    #[rustfmt::skip]
    #[must_use]
    pub fn dendrogram(&self) -> &Dendrogram { &self.dendrogram }

    /// Union of the catalog's motif edges.
    #[rustfmt::skip]
    #[must_use]
    pub fn graph_edges(&self) -> &[WeightedEdge] { &self.graph_edges }

    /// Raw dendrogram cut at `tau`.
    ///
    /// # Errors
    /// Returns [`MotifoldError::Hierarchy`] when the replay fails.
    pub fn partition_at(&self, tau: f32) -> Result<Partition> {
        Ok(self.dendrogram.partition_at(tau)?)
    }

    /// Dendrogram cut at `tau`, split by graph connectivity when configured.
    ///
    /// # Errors
    /// Returns [`MotifoldError::Hierarchy`] or [`MotifoldError::Aggregate`]
    /// when the cut or the split fails.
    pub fn clusters_at(&self, tau: f32) -> Result<Partition> {
        let partition = self.partition_at(tau)?;
        match self.connectivity {
            ClusterConnectivity::AsIs => Ok(partition),
            ClusterConnectivity::SplitDisconnected => Ok(split_disconnected(
                &partition,
                &self.catalog,
                &self.graph_edges,
            )?),
        }
    }

    /// Supernodes of the clusters at `tau`.
    ///
    /// # Errors
    /// Propagates failures from [`Self::clusters_at`] and aggregation.
    pub fn supernodes_at(&self, tau: f32) -> Result<Vec<Supernode>> {
        let clusters = self.clusters_at(tau)?;
        Ok(aggregate(&clusters, &self.catalog)?)
    }

    /// Compressed view of the catalog's own graph at `tau`.
    ///
    /// # Errors
    /// Propagates failures from [`Self::supernodes_at`] and compression.
    pub fn compress_at(&self, tau: f32) -> Result<CompressedGraph> {
        self.compress_edges_at(tau, &self.graph_edges)
    }

    /// Compressed view of an externally supplied edge list at `tau`.
    ///
    /// # Errors
    /// Propagates failures from [`Self::supernodes_at`] and compression.
    pub fn compress_edges_at(&self, tau: f32, edges: &[WeightedEdge]) -> Result<CompressedGraph> {
        let supernodes = self.supernodes_at(tau)?;
        Ok(compress_graph(supernodes, &self.catalog, edges)?)
    }

    /// Nodes and weighted adjacency of cluster `cluster` of
    /// [`Self::clusters_at`] over the catalog's own graph.
    ///
    /// # Errors
    /// Propagates failures from [`Self::clusters_at`] and returns
    /// [`MotifoldError::Aggregate`] when `cluster` is out of range.
    pub fn cluster_subgraph(&self, tau: f32, cluster: ClusterId) -> Result<ClusterSubgraph> {
        let clusters = self.clusters_at(tau)?;
        Ok(cluster_subgraph(
            &clusters,
            &self.catalog,
            &self.graph_edges,
            cluster,
        )?)
    }

    /// Clusters of the raw cut at `tau` grouped by the shape of their
    /// induced subgraphs.
    ///
    /// # Errors
    /// Propagates failures from [`Self::partition_at`] and pattern grouping.
    #[instrument(name = "core.unique_patterns", err, skip(self))]
    pub fn unique_patterns(&self, tau: f32) -> Result<Vec<MotifPattern>> {
        let partition = self.partition_at(tau)?;
        let patterns = unique_patterns(&partition, &self.catalog, &self.graph_edges)?;
        info!(
            clusters = partition.cluster_count(),
            patterns = patterns.len(),
            "cluster shapes grouped"
        );
        Ok(patterns)
    }

    /// Compression achieved by the raw cut at `tau`.
    #[must_use]
    pub fn compression_stats(&self, tau: f32) -> CompressionStats {
        CompressionStats {
            motifs: self.dendrogram.len(),
            supernodes: self.dendrogram.cluster_count_at(tau),
        }
    }
}
