//! Logging Config
//!
//! Diagnostics go to stderr so they never interleave with the tables on
//! stdout.

use clap::Args;

/// How diagnostics are printed on stderr.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// One short line per event, for a terminal.
    Compact,

    /// One JSON object per event, for piping into a log collector.
    Json,
}

/// Diagnostic output settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Stderr verbosity, a level (e.g. info) or a full filter such as
    /// "stockroom_app=debug"
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Stderr log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
