//! Report structures and their text and JSON renderings.

use std::io::{self, Write};

use motifold_core::{CompressedGraph, MotifId, MotifSummary, PersistenceDiagram, PersistencePair};
use serde::Serialize;

use super::{ExecutionSummary, OutputFormat};

/// Summary of a `cluster` run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterReport {
    /// Threshold the dendrogram was cut at.
    pub threshold: f32,
    /// Linkage the dendrogram was built with.
    pub linkage: String,
    /// Motifs in the catalog.
    pub motifs: usize,
    /// Clusters in the raw dendrogram cut.
    pub clusters: usize,
    /// Percentage reduction of the raw cut, one decimal place.
    pub compression_percent: f64,
    /// Supernodes after the connectivity rule.
    pub supernodes: Vec<SupernodeRow>,
    /// Links between supernodes.
    pub links: Vec<LinkRow>,
}

/// One supernode in a [`ClusterReport`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupernodeRow {
    /// Dense cluster identifier.
    pub cluster: u64,
    /// Smallest member identifier.
    pub representative: u64,
    /// Member motif identifiers, ascending.
    pub members: Vec<u64>,
    /// Mean neighbour count of the members.
    pub mean_size: f64,
    /// Population variance of the members' neighbour counts.
    pub size_variance: f64,
}

/// One inter-supernode link in a [`ClusterReport`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkRow {
    /// Lower endpoint node.
    pub source: u64,
    /// Higher endpoint node.
    pub target: u64,
    /// Mean weight of the folded edges.
    pub weight: f32,
    /// Number of folded edges.
    pub multiplicity: usize,
}

/// One persistence pair. Essential features have no death.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairRow {
    /// Node identifying the feature.
    pub feature: u64,
    /// Birth value.
    pub birth: f32,
    /// Death value, `None` for essential features.
    pub death: Option<f32>,
}

/// Summary of a persistence diagram.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagramReport {
    /// Essential features, one per connected component.
    pub components: usize,
    /// Sum of finite lifetimes.
    pub total_persistence: f64,
    /// Every pair in sweep order.
    pub pairs: Vec<PairRow>,
}

/// Persistence diagram of a single motif.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MotifDiagramRow {
    /// Motif identifier.
    pub motif: u64,
    /// The motif's diagram.
    #[serde(flatten)]
    pub diagram: DiagramReport,
}

impl ClusterReport {
    pub(super) fn new(summary: &MotifSummary, threshold: f32, graph: &CompressedGraph) -> Self {
        let stats = summary.compression_stats(threshold);
        Self {
            threshold,
            linkage: summary.dendrogram().linkage().to_string(),
            motifs: stats.motifs(),
            clusters: stats.supernodes(),
            compression_percent: stats.compression_percent(),
            supernodes: graph
                .supernodes()
                .iter()
                .map(|node| SupernodeRow {
                    cluster: node.cluster().get(),
                    representative: node.representative().get(),
                    members: node.members().iter().map(|id| id.get()).collect(),
                    mean_size: node.mean_size(),
                    size_variance: node.size_variance(),
                })
                .collect(),
            links: graph
                .links()
                .iter()
                .map(|link| LinkRow {
                    source: link.source().get(),
                    target: link.target().get(),
                    weight: link.weight(),
                    multiplicity: link.multiplicity(),
                })
                .collect(),
        }
    }
}

impl From<&PersistencePair> for PairRow {
    fn from(pair: &PersistencePair) -> Self {
        Self {
            feature: pair.feature().get(),
            birth: pair.birth(),
            death: (!pair.is_essential()).then(|| pair.death()),
        }
    }
}

impl From<&PersistenceDiagram> for DiagramReport {
    fn from(diagram: &PersistenceDiagram) -> Self {
        Self {
            components: diagram.component_count(),
            total_persistence: diagram.total_persistence(),
            pairs: diagram.pairs().iter().map(PairRow::from).collect(),
        }
    }
}

impl MotifDiagramRow {
    pub(super) fn new(motif: MotifId, diagram: &PersistenceDiagram) -> Self {
        Self {
            motif: motif.get(),
            diagram: DiagramReport::from(diagram),
        }
    }
}

/// Writes `summary` to `writer` in `format`.
///
/// # Errors
/// Returns [`io::Error`] when writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use motifold_cli::cli::{DiagramReport, ExecutionSummary, OutputFormat, PairRow, render_summary};
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Persistence(DiagramReport {
///     components: 1,
///     total_persistence: 5.0,
///     pairs: vec![
///         PairRow { feature: 2, birth: 0.0, death: Some(5.0) },
///         PairRow { feature: 1, birth: 0.0, death: None },
///     ],
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Text, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "components: 1\ntotal persistence: 5\n2\t0\t5\n1\t0\tinf\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
        OutputFormat::Text => match summary {
            ExecutionSummary::Cluster(report) => render_cluster(report, writer),
            ExecutionSummary::Persistence(report) => render_diagram(report, &mut writer),
            ExecutionSummary::MotifPersistence { diagrams } => {
                for row in diagrams {
                    writeln!(writer, "motif: {}", row.motif)?;
                    render_diagram(&row.diagram, &mut writer)?;
                }
                Ok(())
            }
        },
    }
}

fn render_cluster(report: &ClusterReport, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "threshold: {} ({} linkage)", report.threshold, report.linkage)?;
    writeln!(
        writer,
        "clusters: {} of {} motifs ({}% compression)",
        report.clusters, report.motifs, report.compression_percent
    )?;
    writeln!(writer, "supernodes: {}", report.supernodes.len())?;
    for row in &report.supernodes {
        let members: Vec<String> = row.members.iter().map(u64::to_string).collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.3}",
            row.cluster,
            row.representative,
            members.join(","),
            row.mean_size
        )?;
    }
    writeln!(writer, "links: {}", report.links.len())?;
    for link in &report.links {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            link.source, link.target, link.weight, link.multiplicity
        )?;
    }
    Ok(())
}

fn render_diagram(report: &DiagramReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "components: {}", report.components)?;
    writeln!(writer, "total persistence: {}", report.total_persistence)?;
    for pair in &report.pairs {
        match pair.death {
            Some(death) => writeln!(writer, "{}\t{}\t{death}", pair.feature, pair.birth)?,
            None => writeln!(writer, "{}\t{}\tinf", pair.feature, pair.birth)?,
        }
    }
    Ok(())
}
