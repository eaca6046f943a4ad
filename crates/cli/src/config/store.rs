//! Store Config

use std::path::PathBuf;

use clap::Args;
use rusty_money::iso::Currency;
use stockroom_app::store::RestStoreConfig;

use crate::config::ConfigError;

/// Object store backend.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum Backend {
    /// Process-local store, optionally seeded from a fixture.
    Memory,

    /// Hosted Parse-compatible REST store.
    Rest,
}

/// Object store settings.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Store backend (memory, rest)
    #[arg(long, env = "STOCKROOM_BACKEND", value_enum, default_value_t = Backend::Memory)]
    pub backend: Backend,

    /// YAML fixture seeding the in-memory store
    #[arg(long, env = "STOCKROOM_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Hosted store URL including its mount path
    #[arg(long, env = "PARSE_SERVER_URL")]
    pub parse_server_url: Option<String>,

    /// Hosted store application id
    #[arg(long, env = "PARSE_APPLICATION_ID")]
    pub parse_application_id: Option<String>,

    /// Hosted store REST API key
    #[arg(long, env = "PARSE_REST_API_KEY", hide_env_values = true)]
    pub parse_rest_api_key: Option<String>,
}

impl StoreConfig {
    /// Connection settings for the REST backend, whose prices are in
    /// `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first unset variable.
    pub(crate) fn rest(&self, currency: &'static Currency) -> Result<RestStoreConfig, ConfigError> {
        Ok(RestStoreConfig {
            server_url: required(self.parse_server_url.as_ref(), "PARSE_SERVER_URL")?,
            application_id: required(self.parse_application_id.as_ref(), "PARSE_APPLICATION_ID")?,
            rest_api_key: required(self.parse_rest_api_key.as_ref(), "PARSE_REST_API_KEY")?,
            currency,
        })
    }
}

fn required(value: Option<&String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .ok_or(ConfigError::Missing(name))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::ARS;
    use testresult::TestResult;

    use super::*;

    fn rest_config(url: Option<&str>, app: Option<&str>, key: Option<&str>) -> StoreConfig {
        StoreConfig {
            backend: Backend::Rest,
            fixture: None,
            parse_server_url: url.map(str::to_string),
            parse_application_id: app.map(str::to_string),
            parse_rest_api_key: key.map(str::to_string),
        }
    }

    #[test]
    fn complete_rest_settings_resolve() -> TestResult {
        let config = rest_config(Some("https://api.example.com/parse"), Some("app"), Some("key"))
            .rest(ARS)?;

        assert_eq!(config.server_url, "https://api.example.com/parse");
        assert_eq!(config.application_id, "app");
        assert_eq!(config.rest_api_key, "key");
        assert_eq!(config.currency, ARS);

        Ok(())
    }

    #[test]
    fn missing_settings_are_named() {
        let result = rest_config(Some("https://api.example.com/parse"), None, Some("key")).rest(ARS);

        assert!(
            matches!(result, Err(ConfigError::Missing("PARSE_APPLICATION_ID"))),
            "expected Missing(PARSE_APPLICATION_ID), got {result:?}"
        );
    }

    #[test]
    fn blank_settings_count_as_missing() {
        let result = rest_config(Some("  "), Some("app"), Some("key")).rest(ARS);

        assert!(
            matches!(result, Err(ConfigError::Missing("PARSE_SERVER_URL"))),
            "expected Missing(PARSE_SERVER_URL), got {result:?}"
        );
    }
}
