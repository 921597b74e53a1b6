//! Core configuration types and loading.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_connect_timeout_ms, default_database_path, default_graphite_host,
    default_graphite_port, default_listen, default_metric_prefix, default_metrics_port,
    default_true,
};

/// Environment variable that overrides `metrics.graphite_host`.
pub const GRAPHITE_HOST_ENV: &str = "GRAPHITE_HOST";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// SQLite storage settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Metrics sink settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from `path`, or fall back to defaults when the file
    /// does not exist. Parse errors are still reported.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Config::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup.
    ///
    /// Only `GRAPHITE_HOST` is recognised. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(GRAPHITE_HOST_ENV).filter(|h| !h.trim().is_empty()) {
            self.metrics.graphite_host = host;
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the enrollment API binds to.
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Prometheus metrics HTTP port (default: 9090, 0 disables).
    pub metrics_port: Option<u16>,
}

impl ServerConfig {
    /// Effective Prometheus port: the configured value, or 9090 when unset.
    /// 0 means the listener is disabled.
    pub fn metrics_port(&self) -> u16 {
        self.metrics_port.unwrap_or_else(default_metrics_port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_port: None,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Insert the default courses and students into an empty database.
    #[serde(default = "default_true")]
    pub seed: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            seed: true,
        }
    }
}

/// Graphite metrics sink configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Send counters to Graphite. When false, counters are only kept in-process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Graphite carbon host. Overridden by `GRAPHITE_HOST`.
    #[serde(default = "default_graphite_host")]
    pub graphite_host: String,
    /// Graphite plaintext protocol port.
    #[serde(default = "default_graphite_port")]
    pub graphite_port: u16,
    /// Prefix prepended to every metric path.
    #[serde(default = "default_metric_prefix")]
    pub prefix: String,
    /// Connect timeout for the sink, in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl MetricsConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            graphite_host: default_graphite_host(),
            graphite_port: default_graphite_port(),
            prefix: default_metric_prefix(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
