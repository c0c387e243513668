//! Workspace quota exporter.
//!
//! Polls the Admin SDK customer usage-report API for storage-quota figures
//! and republishes them as an HTML status page (`/`) and a Prometheus
//! metrics endpoint (`/metrics`).
//!
//! # Environment Variables
//! - `CREDENTIALS_FILE` - OAuth client secret file (default: credentials.json)
//! - `TOKEN_FILE` - cached OAuth token (default: token.json)
//! - `PORT` - listen port (default: 8080)
//! - `STATS_TOKEN` / `METRICS_TOKEN` - per-endpoint shared secrets (default: open)

use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use workspace_quota::application::fetcher::QuotaFetcher;
use workspace_quota::config::Config;
use workspace_quota::infrastructure::google::auth::GoogleCredentialProvider;
use workspace_quota::infrastructure::google::reports::AdminReportsClient;
use workspace_quota::infrastructure::observability::QuotaMetrics;
use workspace_quota::interfaces::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!(
        "Workspace quota exporter {} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: port={}, credentials={}",
        config.port,
        config.credentials_file.display()
    );

    let credentials = Arc::new(
        GoogleCredentialProvider::from_files(&config.credentials_file, &config.token_file).await?,
    );
    let reports = Arc::new(AdminReportsClient::new(credentials));
    let fetcher = Arc::new(QuotaFetcher::new(reports));
    let metrics = QuotaMetrics::new(fetcher.clone())?;

    let state = AppState { fetcher, metrics };
    server::serve(&config, state).await
}
