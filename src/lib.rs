//! enrolld - student course enrollment service.
//!
//! Tracks students, courses and the enrollments joining them, and serves
//! a small HTTP API to list, enroll and drop.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod metrics;
pub mod telemetry;
