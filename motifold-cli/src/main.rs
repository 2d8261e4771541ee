//! Entry point for the `motifold` binary.
//!
//! Parses arguments, runs the selected command and writes its summary to
//! stdout. Failures are logged with their stable error codes and turn into a
//! non-zero exit status.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use motifold_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;
    let summary = run_cli(cli).context("failed to execute command")?;
    let mut writer = BufWriter::new(io::stdout().lock());
    render_summary(&summary, format, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, detail) = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => (Some(core.code().as_str()), core.detail_code()),
            Some(CliError::Catalog(catalog)) => (Some(catalog.code().as_str()), None),
            Some(CliError::Persistence(persistence)) => (Some(persistence.code().as_str()), None),
            _ => (None, None),
        };
        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code.map(field::display),
            detail_code = detail.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "logging is not available to report its own failure"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
