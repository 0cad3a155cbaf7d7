//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! configuration files, and environment variables.

use crate::Cli;
use cotacao_sqlite::config::SqliteConfig;
use serde::{Deserialize, Serialize};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Relay configuration (bind address, upstream endpoint, deadlines)
    #[serde(default)]
    pub server: cotacao_axum::config::AxumConfig,

    /// Price store configuration
    #[serde(default = "default_database")]
    pub database: SqliteConfig,
}

fn default_database() -> SqliteConfig {
    SqliteConfig::file("quotations.db")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: Default::default(),
            database: default_database(),
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
    /// # Keep the price store somewhere else
    /// export APP_DATABASE__DATABASE_PATH="/var/lib/cotacao/quotations.db"
    ///
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="127.0.0.1:8080"
    ///
    /// # Loosen the upstream deadline
    /// export APP_SERVER__UPSTREAM_TIMEOUT="500ms"
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

        // Override with environment variables
        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
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
