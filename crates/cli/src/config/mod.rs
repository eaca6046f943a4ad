//! CLI configuration module

use clap::Parser;
use thiserror::Error;

use crate::{
    commands::Command,
    config::{
        display::DisplayConfig, observability::LoggingConfig, sales::SalesConfig,
        store::StoreConfig,
    },
};

pub(crate) mod display;
pub(crate) mod observability;
pub(crate) mod sales;
pub(crate) mod store;

/// Errors raised while turning parsed settings into runtime values.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// A setting required by the selected backend was not provided.
    #[error("missing setting {0}")]
    Missing(&'static str),

    /// The configured currency is not an ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Stockroom CLI configuration
#[derive(Debug, Parser)]
#[command(name = "stockroom", about = "Stockroom inventory and sales CLI", long_about = None)]
pub(crate) struct CliConfig {
    /// Object store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Sale toggle settings.
    #[command(flatten)]
    pub sales: SalesConfig,

    /// Table rendering settings.
    #[command(flatten)]
    pub display: DisplayConfig,

    /// What to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
