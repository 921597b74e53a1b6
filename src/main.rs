//! enrolld - student course enrollment service.

use anyhow::Context;
use enrolld::config::{self, Config};
use enrolld::db::Database;
use enrolld::http::{self, AppState};
use enrolld::metrics::{self, Metrics};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load_or_default(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See messages above.",
            errors.len()
        ));
    }

    info!(
        listen = %config.server.listen,
        database = %config.database.path,
        "Starting enrolld"
    );

    // Initialize database
    let db = Database::new(&config.database.path)
        .await
        .with_context(|| format!("opening database {}", config.database.path))?;

    if config.database.seed {
        db.seed_defaults().await.context("seeding database")?;
    }

    // Prometheus metrics are optional.
    // Convention: metrics_port = 0 disables the HTTP endpoint.
    metrics::init();
    let metrics_port = config.server.metrics_port();
    if metrics_port == 0 {
        info!("Metrics endpoint disabled");
    } else {
        tokio::spawn(async move {
            http::run_metrics_server(metrics_port).await;
        });
        info!(port = metrics_port, "Prometheus HTTP server started");
    }

    let state = AppState::new(db, Metrics::from_config(&config.metrics));

    let listener = tokio::net::TcpListener::bind(config.server.listen)
        .await
        .with_context(|| format!("binding {}", config.server.listen))?;

    http::serve(listener, state).await?;

    Ok(())
}
