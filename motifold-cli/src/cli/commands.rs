//! Command definitions and execution for the motifold CLI.

use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use motifold_core::{
    CatalogError, ClusterConnectivity, ExecutionStrategy, Linkage, MotifId, MotifoldBuilder,
    MotifoldError, PersistenceError, WeightProfile, extract_persistence_pairs, motif_persistence,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::{
    input::{load_catalog, load_distances, load_edges},
    render::{ClusterReport, DiagramReport, MotifDiagramRow},
};

const DEFAULT_MISSING_DISTANCE: f32 = 100.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "motifold",
    about = "Summarise weighted graphs through motif clustering and persistence."
)]
pub struct Cli {
    /// Output format for the summary on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster motifs and report the supernodes at a threshold.
    Cluster(ClusterArgs),
    /// Extract the persistence diagram of a weighted edge list.
    Persistence(PersistenceArgs),
    /// Extract one persistence diagram per motif from its maximum spanning tree.
    MotifPersistence(MotifPersistenceArgs),
}

/// Options accepted by the `cluster` command.
#[derive(Debug, Args, Clone)]
pub struct ClusterArgs {
    /// Motif catalog in `{"motifs": [...]}` form.
    pub motifs: PathBuf,

    /// Distance threshold; merges at or below it are applied.
    #[arg(long)]
    pub threshold: f32,

    /// Linkage used to build the dendrogram.
    #[arg(long, value_enum, default_value_t = LinkageArg::Average)]
    pub linkage: LinkageArg,

    /// Edge weights compared between motifs.
    #[arg(long, value_enum, default_value_t = WeightsArg::All)]
    pub weights: WeightsArg,

    /// Distance computation strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Precomputed `{"a-b": distance}` map used instead of computed distances.
    #[arg(long)]
    pub distances: Option<PathBuf>,

    /// Distance assumed for pairs absent from `--distances`.
    #[arg(long, default_value_t = DEFAULT_MISSING_DISTANCE)]
    pub missing_distance: f32,

    /// Whether clusters are split along graph connectivity.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Split)]
    pub connectivity: ConnectivityArg,

    /// Edge list to compress instead of the catalog's own edges.
    #[arg(long)]
    pub edges: Option<PathBuf>,
}

/// Options accepted by the `persistence` command.
#[derive(Debug, Args, Clone)]
pub struct PersistenceArgs {
    /// Edge list in `[{"from","to","weight"}]` form.
    pub edges: PathBuf,
}

/// Options accepted by the `motif-persistence` command.
#[derive(Debug, Args, Clone)]
pub struct MotifPersistenceArgs {
    /// Motif catalog in `{"motifs": [...]}` form.
    pub motifs: PathBuf,

    /// Restrict output to these motifs.
    #[arg(long = "motif")]
    pub only: Vec<u64>,
}

/// Linkage choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkageArg {
    /// Nearest-pair linkage.
    Single,
    /// Mean-distance linkage.
    Average,
}

/// Weight profile choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeightsArg {
    /// Spoke and internal edges.
    All,
    /// Internal edges only.
    Internal,
}

/// Execution strategy choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel for large catalogs when available.
    Auto,
    /// Always sequential.
    Sequential,
    /// Always parallel.
    Parallel,
}

/// Connectivity rule choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectivityArg {
    /// Split clusters whose members are not connected in the graph.
    Split,
    /// Keep dendrogram clusters unchanged.
    Keep,
}

/// Output format for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl From<LinkageArg> for Linkage {
    fn from(value: LinkageArg) -> Self {
        match value {
            LinkageArg::Single => Self::Single,
            LinkageArg::Average => Self::Average,
        }
    }
}

impl From<WeightsArg> for WeightProfile {
    fn from(value: WeightsArg) -> Self {
        match value {
            WeightsArg::All => Self::All,
            WeightsArg::Internal => Self::InternalOnly,
        }
    }
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

impl From<ConnectivityArg> for ClusterConnectivity {
    fn from(value: ConnectivityArg) -> Self {
        match value {
            ConnectivityArg::Split => Self::SplitDisconnected,
            ConnectivityArg::Keep => Self::AsIs,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input file was not valid JSON for its expected layout.
    #[error("failed to parse `{path}`: {source}")]
    Json {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A precomputed distance key was not of the form `a-b`.
    #[error("distance key `{key}` must look like `<motif>-<motif>`")]
    InvalidDistanceKey {
        /// Offending key.
        key: String,
    },
    /// `--motif` named a motif the catalog does not contain.
    #[error("motif {id} is not in the catalog")]
    UnknownMotif {
        /// Requested motif identifier.
        id: u64,
    },
    /// The motif records did not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Persistence extraction failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// Core summarisation failed.
    #[error(transparent)]
    Core(#[from] MotifoldError),
}

/// Outcome of a CLI command, ready for rendering.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum ExecutionSummary {
    /// Result of `cluster`.
    Cluster(ClusterReport),
    /// Result of `persistence`.
    Persistence(DiagramReport),
    /// Result of `motif-persistence`.
    MotifPersistence {
        /// One diagram per reported motif.
        diagrams: Vec<MotifDiagramRow>,
    },
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or the core rejects it.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use motifold_cli::cli::{Cli, Command, ExecutionSummary, OutputFormat, PersistenceArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"[{"from": 1, "to": 2, "weight": 5.0}, {"from": 2, "to": 3, "weight": 8.0}]"#,
/// )?;
/// let cli = Cli {
///     format: OutputFormat::Text,
///     command: Command::Persistence(PersistenceArgs {
///         edges: file.path().to_path_buf(),
///     }),
/// };
/// let ExecutionSummary::Persistence(report) = run_cli(cli)? else {
///     unreachable!("persistence command yields a diagram");
/// };
/// assert_eq!(report.components, 1);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Cluster(args) => {
            span.record("command", "cluster");
            run_cluster(args)
        }
        Command::Persistence(args) => {
            span.record("command", "persistence");
            run_persistence(&args)
        }
        Command::MotifPersistence(args) => {
            span.record("command", "motif-persistence");
            run_motif_persistence(&args)
        }
    }
}

#[instrument(
    name = "cli.cluster",
    err,
    skip(args),
    fields(threshold = args.threshold, linkage = ?args.linkage, precomputed = args.distances.is_some()),
)]
pub(super) fn run_cluster(args: ClusterArgs) -> Result<ExecutionSummary, CliError> {
    let motifold = MotifoldBuilder::new()
        .with_linkage(args.linkage.into())
        .with_weight_profile(args.weights.into())
        .with_execution_strategy(args.strategy.into())
        .with_missing_distance(args.missing_distance)
        .with_connectivity(args.connectivity.into())
        .build()?;

    let catalog = load_catalog(&args.motifs)?;
    let summary = match &args.distances {
        Some(path) => motifold.summarize_with_distances(catalog, load_distances(path)?)?,
        None => motifold.summarize(catalog)?,
    };
    let graph = match &args.edges {
        Some(path) => summary.compress_edges_at(args.threshold, &load_edges(path)?)?,
        None => summary.compress_at(args.threshold)?,
    };
    let report = ClusterReport::new(&summary, args.threshold, &graph);
    info!(
        motifs = report.motifs,
        supernodes = report.supernodes.len(),
        links = report.links.len(),
        "cluster command completed"
    );
    Ok(ExecutionSummary::Cluster(report))
}

#[instrument(name = "cli.persistence", err, skip(args), fields(path = %args.edges.display()))]
pub(super) fn run_persistence(args: &PersistenceArgs) -> Result<ExecutionSummary, CliError> {
    let edges = load_edges(&args.edges)?;
    let diagram = extract_persistence_pairs(&edges)?;
    info!(
        pairs = diagram.len(),
        components = diagram.component_count(),
        "persistence command completed"
    );
    Ok(ExecutionSummary::Persistence(DiagramReport::from(&diagram)))
}

#[instrument(
    name = "cli.motif_persistence",
    err,
    skip(args),
    fields(path = %args.motifs.display(), selected = args.only.len()),
)]
pub(super) fn run_motif_persistence(
    args: &MotifPersistenceArgs,
) -> Result<ExecutionSummary, CliError> {
    let catalog = load_catalog(&args.motifs)?;
    if let Some(&id) = args
        .only
        .iter()
        .find(|&&id| catalog.by_id(MotifId::new(id)).is_none())
    {
        return Err(CliError::UnknownMotif { id });
    }
    let mut diagrams = Vec::new();
    for motif in &catalog {
        if !args.only.is_empty() && !args.only.contains(&motif.id().get()) {
            continue;
        }
        let diagram = motif_persistence(motif)?;
        diagrams.push(MotifDiagramRow::new(motif.id(), &diagram));
    }
    info!(diagrams = diagrams.len(), "motif persistence command completed");
    Ok(ExecutionSummary::MotifPersistence { diagrams })
}
