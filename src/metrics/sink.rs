//! Best-effort delivery of named counters to an external sink.
//!
//! Handlers call [`Metrics::emit`] after a successful mutation or page view.
//! Delivery runs on a spawned task; a sink failure is logged and counted,
//! never returned to the caller, and never retried.

use crate::config::MetricsConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Transport failures talking to a metrics sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("connect to {0} timed out")]
    Timeout(String),
    #[error("sink i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A destination for named integer counters.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn send(&self, name: &str, value: u64) -> Result<(), SinkError>;
}

/// Sink that drops everything.
pub struct NoopSink;

#[async_trait]
impl MetricSink for NoopSink {
    async fn send(&self, _name: &str, _value: u64) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Graphite plaintext protocol sink.
///
/// Opens one TCP connection per counter and writes a single
/// `<prefix>.<name> <value> <timestamp>` line.
pub struct GraphiteSink {
    host: String,
    port: u16,
    prefix: String,
    connect_timeout: Duration,
}

impl GraphiteSink {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        prefix: impl Into<String>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            prefix: prefix.into(),
            connect_timeout,
        }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(
            config.graphite_host.clone(),
            config.graphite_port,
            config.prefix.clone(),
            config.connect_timeout(),
        )
    }

    /// Format one plaintext protocol line.
    pub fn format_line(&self, name: &str, value: u64, timestamp: i64) -> String {
        if self.prefix.is_empty() {
            format!("{} {} {}\n", name, value, timestamp)
        } else {
            format!("{}.{} {} {}\n", self.prefix, name, value, timestamp)
        }
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl MetricSink for GraphiteSink {
    async fn send(&self, name: &str, value: u64) -> Result<(), SinkError> {
        let line = self.format_line(name, value, chrono::Utc::now().timestamp());
        let addr = self.addr();

        let mut stream = tokio::time::timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| SinkError::Timeout(addr.clone()))??;

        stream.write_all(line.as_bytes()).await?;
        stream.shutdown().await?;
        Ok(())
    }
}

/// Counter emitter shared by all handlers.
#[derive(Clone)]
pub struct Metrics {
    sink: Arc<dyn MetricSink>,
}

impl Metrics {
    pub fn new(sink: Arc<dyn MetricSink>) -> Self {
        Self { sink }
    }

    /// Graphite sink when enabled, otherwise in-process counters only.
    pub fn from_config(config: &MetricsConfig) -> Self {
        if config.enabled {
            tracing::info!(
                host = %config.graphite_host,
                port = config.graphite_port,
                prefix = %config.prefix,
                "Graphite metrics sink configured"
            );
            Self::new(Arc::new(GraphiteSink::from_config(config)))
        } else {
            tracing::info!("Graphite metrics sink disabled");
            Self::disabled()
        }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    /// Emit a named counter without waiting for delivery.
    ///
    /// The returned handle resolves once delivery finished or failed; callers
    /// on the request path drop it.
    pub fn emit(&self, name: &'static str, value: u64) -> JoinHandle<()> {
        super::record_event(name, value);

        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            match sink.send(name, value).await {
                Ok(()) => tracing::debug!(metric = name, value, "Sent metric"),
                Err(e) => {
                    super::record_sink_failure();
                    tracing::warn!(metric = name, error = %e, "Error sending metric");
                }
            }
        })
    }
}
