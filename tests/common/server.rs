//! Test server management.
//!
//! Runs the enrollment API on an ephemeral local port inside the test
//! runtime.

use enrolld::db::Database;
use enrolld::http::{AppState, serve};
use enrolld::metrics::Metrics;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<std::io::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server over a seeded in-memory database.
    pub async fn spawn() -> anyhow::Result<Self> {
        let db = Database::new(":memory:").await?;
        db.seed_defaults().await?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(serve(listener, AppState::new(db, Metrics::disabled())));

        Ok(Self { addr, handle })
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
