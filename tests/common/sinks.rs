//! Metric sinks for tests.

use async_trait::async_trait;
use enrolld::metrics::{MetricSink, SinkError};
use std::sync::Mutex;

/// Records every counter it receives.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn names(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn send(&self, name: &str, _value: u64) -> Result<(), SinkError> {
        self.sent.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

/// Fails every delivery, like an unreachable Graphite host.
pub struct FailingSink;

#[async_trait]
impl MetricSink for FailingSink {
    async fn send(&self, _name: &str, _value: u64) -> Result<(), SinkError> {
        Err(SinkError::Timeout("graphite.invalid:2003".to_string()))
    }
}
