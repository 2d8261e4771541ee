//! Command-line interface for summarising motif catalogs and filtrations.
//!
//! `cluster` cuts a motif dendrogram at a threshold and reports supernodes,
//! `persistence` extracts the 0-dimensional diagram of a weighted edge list
//! and `motif-persistence` does the same per motif over its maximum spanning
//! tree.

mod commands;
mod input;
mod render;

pub use commands::{
    Cli, ClusterArgs, CliError, Command, ConnectivityArg, ExecutionSummary, LinkageArg,
    MotifPersistenceArgs, OutputFormat, PersistenceArgs, StrategyArg, WeightsArg, run_cli,
};
pub use input::{EdgeRecord, EdgeType, MotifFile, MotifRecord, parse_distance_key};
pub use render::{
    ClusterReport, DiagramReport, LinkRow, MotifDiagramRow, PairRow, SupernodeRow,
    render_summary,
};
