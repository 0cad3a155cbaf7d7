//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the relay, including
//! network binding, the upstream endpoint and the two deadlines the relay
//! enforces on its own operations.

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// Configuration for the Axum HTTP server.
///
/// Durations (de)serialize in human-readable form, e.g. `"200ms"`.
///
/// # Examples
///
/// ```
/// use cotacao_axum::config::AxumConfig;
/// use std::time::Duration;
///
/// // Use default configuration
/// let config = AxumConfig::default();
/// assert_eq!(config.upstream_timeout, Duration::from_millis(200));
/// assert_eq!(config.persist_timeout, Duration::from_millis(10));
///
/// // Point the relay at a staging API
/// let config = AxumConfig {
///     upstream_url: "http://staging.internal/json/last/USD-BRL".to_string(),
///     ..AxumConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// The upstream endpoint serving the USD/BRL quotation
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// How long a single upstream fetch may take, body included
    #[serde(default = "default_upstream_timeout", with = "humantime_serde")]
    pub upstream_timeout: Duration,

    /// How long recording a price may take
    #[serde(default = "default_persist_timeout", with = "humantime_serde")]
    pub persist_timeout: Duration,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_upstream_url() -> String {
    "https://economia.awesomeapi.com.br/json/last/USD-BRL".to_string()
}

fn default_upstream_timeout() -> Duration {
    Duration::from_millis(200)
}

fn default_persist_timeout() -> Duration {
    Duration::from_millis(10)
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            upstream_url: default_upstream_url(),
            upstream_timeout: default_upstream_timeout(),
            persist_timeout: default_persist_timeout(),
        }
    }
}
