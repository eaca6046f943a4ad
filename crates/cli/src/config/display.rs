//! Display Config

use clap::Args;
use rusty_money::iso::{self, Currency};

use crate::config::ConfigError;

/// Table rendering settings.
#[derive(Debug, Args)]
pub(crate) struct DisplayConfig {
    /// ISO 4217 code of the store's prices [default: fixture currency, else ARS]
    #[arg(long, env = "STOCKROOM_CURRENCY")]
    pub currency: Option<String>,
}

impl DisplayConfig {
    /// Resolve the configured currency code, if one was given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] for codes rusty-money does
    /// not know.
    pub(crate) fn currency(&self) -> Result<Option<&'static Currency>, ConfigError> {
        self.currency
            .as_deref()
            .map(|code| {
                iso::find(&code.to_uppercase())
                    .ok_or_else(|| ConfigError::UnknownCurrency(code.to_string()))
            })
            .transpose()
    }
}
