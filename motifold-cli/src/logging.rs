//! Structured logging setup for the motifold CLI.
//!
//! Diagnostics go to stderr so summaries on stdout stay machine-readable.
//! `RUST_LOG` selects the level (default `info`) and `MOTIFOLD_LOG_FORMAT`
//! selects `human` or `json` output.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable choosing the log format.
pub const LOG_FORMAT_ENV: &str = "MOTIFOLD_LOG_FORMAT";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format for log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// One JSON object per line, with the span stack.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `MOTIFOLD_LOG_FORMAT` held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `MOTIFOLD_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
}

/// Reads the requested format from `MOTIFOLD_LOG_FORMAT`.
///
/// # Errors
/// Returns [`LoggingError`] for invalid UTF-8 or an unknown format.
pub fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

/// Installs the global subscriber once and returns the format in use.
///
/// Later calls return the first call's format. When another subscriber
/// already owns the global slot, it is left in place.
///
/// # Errors
/// Returns [`LoggingError`] when the format variable is unusable.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let format = format_from_env()?;
    install(format);
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Both installs fail only when a logger is already registered, which
    // keeps that logger in charge.
    let _ = LogTracer::init();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::human("human", LogFormat::Human)]
    #[case::text_alias("Text", LogFormat::Human)]
    #[case::padded_json(" JSON ", LogFormat::Json)]
    fn parses_supported_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>().expect("format parses"), expected);
    }

    #[test]
    fn rejects_unknown_formats() {
        let err = "xml".parse::<LogFormat>().expect_err("xml is unsupported");
        assert!(matches!(
            err,
            LoggingError::UnsupportedFormat { ref provided } if provided == "xml"
        ));
    }

    #[test]
    fn init_logging_is_idempotent() {
        let first = init_logging().expect("logging initialises");
        let second = init_logging().expect("repeat calls succeed");
        assert_eq!(first, second);
    }
}
