//! Telemetry utilities for request timing.

use std::time::Instant;

/// Guard for timing request handling and recording metrics.
///
/// Records route latency and final status when dropped. A timer dropped
/// before [`RequestTimer::set_status`] (a cancelled request) records nothing.
pub struct RequestTimer {
    route: String,
    status: Option<u16>,
    start: Instant,
}

impl RequestTimer {
    /// Start timing a request.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            status: None,
            start: Instant::now(),
        }
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        if let Some(status) = self.status {
            let duration = self.start.elapsed().as_secs_f64();
            crate::metrics::record_request(&self.route, status, duration);
        }
    }
}
