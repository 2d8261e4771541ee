//! JSON input records and their conversion into core types.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use motifold_core::{EdgeKind, Motif, MotifCatalog, MotifEdge, MotifId, NodeId, WeightedEdge};
use serde::Deserialize;
use tracing::{Span, debug, field, instrument};

use super::CliError;

/// Motif catalog file: `{"motifs": [...]}`.
///
/// Extra fields such as `motif_id` or per-file statistics are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct MotifFile {
    /// One record per source node.
    pub motifs: Vec<MotifRecord>,
}

/// One-hop motif around `source_node`.
#[derive(Clone, Debug, Deserialize)]
pub struct MotifRecord {
    /// Centre of the motif; also its identifier.
    pub source_node: u64,
    /// Direct neighbours of the source.
    #[serde(default)]
    pub neighbors: Vec<u64>,
    /// Spoke and internal edges.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Weighted edge as written in motif and edge-list files.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeRecord {
    /// First endpoint.
    pub from: u64,
    /// Second endpoint.
    pub to: u64,
    /// Edge weight.
    pub weight: f32,
    /// Role inside a motif; inferred from the endpoints when absent.
    #[serde(default)]
    pub edge_type: Option<EdgeType>,
}

/// Role label used in motif files.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Edge between the source and a neighbour.
    SourceToNeighbor,
    /// Edge between two neighbours.
    NeighborToNeighbor,
}

impl MotifRecord {
    fn into_motif(self) -> Motif {
        let source = NodeId::new(self.source_node);
        let edges = self
            .edges
            .into_iter()
            .map(|edge| {
                let kind = match edge.edge_type {
                    Some(EdgeType::SourceToNeighbor) => EdgeKind::Spoke,
                    Some(EdgeType::NeighborToNeighbor) => EdgeKind::Internal,
                    None if edge.from == self.source_node || edge.to == self.source_node => {
                        EdgeKind::Spoke
                    }
                    None => EdgeKind::Internal,
                };
                MotifEdge::new(NodeId::new(edge.from), NodeId::new(edge.to), edge.weight, kind)
            })
            .collect();
        Motif::from_source(
            source,
            self.neighbors.into_iter().map(NodeId::new).collect(),
            edges,
        )
    }
}

impl EdgeRecord {
    fn into_weighted(self) -> WeightedEdge {
        WeightedEdge::new(NodeId::new(self.from), NodeId::new(self.to), self.weight)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn decode<T, R>(reader: R, path: &Path) -> Result<T, CliError>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    serde_json::from_reader(reader).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a motif file into a validated catalog.
#[instrument(name = "cli.load_catalog", err, fields(path = %path.display(), motifs = field::Empty))]
pub(super) fn load_catalog(path: &Path) -> Result<MotifCatalog, CliError> {
    let file: MotifFile = decode(open(path)?, path)?;
    let catalog = MotifCatalog::new(file.motifs.into_iter().map(MotifRecord::into_motif).collect())?;
    Span::current().record("motifs", catalog.len());
    Ok(catalog)
}

/// Parses a flat `[{"from","to","weight"}]` edge list.
#[instrument(name = "cli.load_edges", err, fields(path = %path.display(), edges = field::Empty))]
pub(super) fn load_edges(path: &Path) -> Result<Vec<WeightedEdge>, CliError> {
    let records: Vec<EdgeRecord> = decode(open(path)?, path)?;
    Span::current().record("edges", records.len());
    Ok(records.into_iter().map(EdgeRecord::into_weighted).collect())
}

/// Parses a `{"a-b": distance}` map of precomputed motif distances.
#[instrument(name = "cli.load_distances", err, fields(path = %path.display()))]
pub(super) fn load_distances(path: &Path) -> Result<Vec<(MotifId, MotifId, f32)>, CliError> {
    let raw: BTreeMap<String, f32> = decode(open(path)?, path)?;
    let pairs = raw
        .into_iter()
        .map(|(key, value)| {
            let (left, right) =
                parse_distance_key(&key).ok_or(CliError::InvalidDistanceKey { key })?;
            Ok((left, right, value))
        })
        .collect::<Result<Vec<_>, CliError>>()?;
    debug!(pairs = pairs.len(), "precomputed distances loaded");
    Ok(pairs)
}

/// Splits a `"<left>-<right>"` key into motif identifiers.
///
/// # Examples
/// ```
/// use motifold_cli::cli::parse_distance_key;
/// use motifold_core::MotifId;
///
/// assert_eq!(
///     parse_distance_key("12-7"),
///     Some((MotifId::new(12), MotifId::new(7)))
/// );
/// assert_eq!(parse_distance_key("12"), None);
/// ```
#[must_use]
pub fn parse_distance_key(key: &str) -> Option<(MotifId, MotifId)> {
    let (left, right) = key.split_once('-')?;
    let left = left.trim().parse().ok()?;
    let right = right.trim().parse().ok()?;
    Some((MotifId::new(left), MotifId::new(right)))
}
