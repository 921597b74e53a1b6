//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, ServerConfig, DatabaseConfig, MetricsConfig)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup sanity checks

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, DatabaseConfig, MetricsConfig, ServerConfig};
pub use validation::{ValidationError, validate};
