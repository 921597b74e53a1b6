//! Metrics collection for enrolld.
//!
//! Two destinations share one call site:
//! - an in-process Prometheus registry, scraped from the `/metrics` listener
//! - an external Graphite sink (see [`sink`]), fed best-effort
//!
//! ## Metrics
//!
//! - `enrollment_app_events_total{name}` - Named counters emitted by handlers
//! - `enrollment_app_requests_total{route, status}` - Requests served
//! - `enrollment_app_request_duration_seconds{route}` - Request latency histogram
//! - `enrollment_app_sink_failures_total` - Counters the Graphite sink failed to deliver

pub mod sink;

pub use sink::{GraphiteSink, Metrics, MetricSink, NoopSink, SinkError};

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Named application events (enrollments, drops, page views).
pub static EVENTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Requests served by route and status code.
pub static REQUESTS: OnceLock<IntCounterVec> = OnceLock::new();

/// Request latency by route.
pub static REQUEST_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Sink deliveries that failed.
pub static SINK_FAILURES: OnceLock<IntCounter> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(EVENTS, IntCounterVec::new(Opts::new("enrollment_app_events_total", "Named application events"), &["name"]));
    register!(REQUESTS, IntCounterVec::new(Opts::new("enrollment_app_requests_total", "HTTP requests served"), &["route", "status"]));
    register!(REQUEST_LATENCY, HistogramVec::new(
        HistogramOpts::new("enrollment_app_request_duration_seconds", "HTTP request latency by route")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["route"]));
    register!(SINK_FAILURES, IntCounter::new("enrollment_app_sink_failures_total", "Metric deliveries the sink failed"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Count a named event.
#[inline]
pub fn record_event(name: &str, value: u64) {
    if let Some(c) = EVENTS.get() {
        c.with_label_values(&[name]).inc_by(value);
    }
}

/// Record a served request with its latency.
#[inline]
pub fn record_request(route: &str, status: u16, duration_secs: f64) {
    if let Some(c) = REQUESTS.get() {
        c.with_label_values(&[route, &status.to_string()]).inc();
    }
    if let Some(h) = REQUEST_LATENCY.get() {
        h.with_label_values(&[route]).observe(duration_secs);
    }
}

#[inline]
pub fn record_sink_failure() {
    if let Some(c) = SINK_FAILURES.get() {
        c.inc();
    }
}
