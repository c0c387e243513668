//! Router assembly and listener.

use crate::application::fetcher::QuotaFetcher;
use crate::config::Config;
use crate::infrastructure::observability::QuotaMetrics;
use crate::interfaces::auth::require_token;
use crate::interfaces::stats::stats_page;
use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<QuotaFetcher>,
    pub metrics: QuotaMetrics,
}

/// Both endpoints sit behind their own token gate; an empty secret leaves
/// that endpoint open.
pub fn build_router(config: &Config, state: AppState) -> Router {
    let stats = Router::new()
        .route("/", get(stats_page))
        .route_layer(middleware::from_fn_with_state(
            config.stats_token.clone(),
            require_token,
        ));

    let metrics = Router::new()
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn_with_state(
            config.metrics_token.clone(),
            require_token,
        ));

    Router::new().merge(stats).merge(metrics).with_state(state)
}

async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics.render(),
    )
}

pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let app = build_router(config, state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {} (stats: /, metrics: /metrics)", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received. Exiting...");
}
