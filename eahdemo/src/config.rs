//! Application configuration management.
//!
//! Configuration is merged from default values, an optional file and environment
//! variables, in increasing order of precedence.

use crate::Cli;
use eah_core::models::MerchantConfig;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Where the backend lives and how long to wait for it
    #[serde(default)]
    pub backend: eah_http::config::HttpConfig,

    /// Where the bearer token is kept
    #[serde(default = "default_store")]
    pub store: eah_sqlite::config::SqliteConfig,

    /// The merchant details shown in the checkout
    #[serde(default)]
    pub merchant: MerchantConfig,

    /// The demonstration server (used by `serve`)
    #[serde(default)]
    pub server: eah_axum::config::AxumConfig,
}

fn default_store() -> eah_sqlite::config::SqliteConfig {
    eah_sqlite::config::SqliteConfig {
        database_path: Some("eahdemo.db".into()),
        create_if_missing: true,
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Default::default(),
            store: default_store(),
            merchant: Default::default(),
            server: Default::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Point the client at a staging backend
    /// export APP_BACKEND__BASE_URL="https://staging.example.com/api/"
    ///
    /// # Give slow networks more time
    /// export APP_BACKEND__TIMEOUT="1m"
    ///
    /// # Use the live checkout key
    /// export APP_MERCHANT__KEY="rzp_live_xxxxxxxxxxxx"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps APP_BACKEND__BASE_URL to backend.base_url
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
