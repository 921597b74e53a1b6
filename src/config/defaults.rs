//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::SocketAddr;

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

pub fn default_metrics_port() -> u16 {
    9090
}

// =============================================================================
// Database Defaults
// =============================================================================

pub fn default_database_path() -> String {
    "instance/enrollment.db".to_string()
}

// =============================================================================
// Metrics Sink Defaults
// =============================================================================

pub fn default_graphite_host() -> String {
    "localhost".to_string()
}

pub fn default_graphite_port() -> u16 {
    2003
}

pub fn default_metric_prefix() -> String {
    "enrollment_app".to_string()
}

pub fn default_connect_timeout_ms() -> u64 {
    500
}
