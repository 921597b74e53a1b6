//! HTTP surface.
//!
//! The enrollment API is served from one listener; Prometheus metrics are
//! served from a second, optional listener so scrapes never share the
//! request path.

mod handlers;
mod page;

use crate::db::Database;
use crate::metrics::Metrics;
use crate::telemetry::RequestTimer;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: Database, metrics: Metrics) -> Self {
        Self { db, metrics }
    }
}

/// Build the enrollment API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/enroll", post(handlers::enroll))
        .route("/drop", post(handlers::drop_enrollment))
        .route("/course/:course_id/students", get(handlers::course_students))
        .route_layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Time every routed request and record its final status.
///
/// Installed with `route_layer`, so a matched path is always present.
async fn track_requests(matched: MatchedPath, req: Request, next: Next) -> Response {
    let mut timer = RequestTimer::new(matched.as_str());

    let response = next.run(req).await;
    timer.set_status(response.status().as_u16());
    response
}

/// Serve the enrollment API on an already-bound listener until the
/// process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Enrollment API listening");
    }
    axum::serve(listener, router(state)).await
}

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

/// Run the HTTP server for Prometheus metrics.
///
/// Binds to `0.0.0.0:port` and serves the `/metrics` endpoint.
/// This is a long-running task that should be spawned in the background.
pub async fn run_metrics_server(port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind metrics server on {}: {}", addr, e);
            return;
        }
    };

    serve_metrics(listener).await;
}

/// Serve `/metrics` on an already-bound listener.
pub async fn serve_metrics(listener: TcpListener) {
    let app = Router::new().route("/metrics", get(metrics_handler));

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Prometheus HTTP server listening on {}", addr);
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Metrics server error: {}", e);
    }
}
