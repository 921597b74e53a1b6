//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("database.path is required")]
    MissingDatabasePath,
    #[error("metrics.graphite_host is required when metrics are enabled")]
    MissingGraphiteHost,
    #[error("metrics.graphite_port must be non-zero")]
    InvalidGraphitePort,
    #[error("metrics.prefix must not contain whitespace, got '{0}'")]
    InvalidMetricPrefix(String),
    #[error("server.metrics_port {0} collides with server.listen")]
    MetricsPortCollision(u16),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.database.path.trim().is_empty() {
        errors.push(ValidationError::MissingDatabasePath);
    }

    if config.metrics.enabled {
        if config.metrics.graphite_host.trim().is_empty() {
            errors.push(ValidationError::MissingGraphiteHost);
        }
        if config.metrics.graphite_port == 0 {
            errors.push(ValidationError::InvalidGraphitePort);
        }
    }

    // Graphite paths are whitespace-delimited on the wire
    if config.metrics.prefix.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidMetricPrefix(
            config.metrics.prefix.clone(),
        ));
    }

    let metrics_port = config.server.metrics_port();
    if metrics_port != 0 && metrics_port == config.server.listen.port() {
        errors.push(ValidationError::MetricsPortCollision(metrics_port));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
