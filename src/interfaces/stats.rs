//! HTML status page.

use crate::domain::quota::QuotaSnapshot;
use crate::interfaces::server::AppState;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

const STATS_TEMPLATE: &str = include_str!("../../templates/stats.html");

/// Display record handed to the template.
#[derive(Debug, Serialize)]
pub struct QuotaStatsView {
    /// Report date in ISO calendar form (YYYY-MM-DD).
    pub date: String,
    /// Total quota in TB, exactly three fractional digits.
    pub total_quota: String,
    /// Used quota in TB, exactly three fractional digits.
    pub used_quota: String,
    pub percentage_used: f64,
}

impl QuotaStatsView {
    pub fn from_snapshot(snapshot: &QuotaSnapshot) -> Self {
        Self {
            date: snapshot.report_date.format("%Y-%m-%d").to_string(),
            total_quota: format!("{:.3}", snapshot.total_quota_tb()),
            used_quota: format!("{:.3}", snapshot.used_quota_tb()),
            percentage_used: snapshot.percentage_used(),
        }
    }
}

pub fn render_stats(view: &QuotaStatsView) -> Result<String> {
    let env = Environment::new();
    let template = env
        .template_from_str(STATS_TEMPLATE)
        .context("Failed to parse stats template")?;

    template
        .render(view)
        .context("Failed to render stats template")
}

pub async fn stats_page(State(state): State<AppState>) -> Response {
    let snapshot = match state.fetcher.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to fetch quota stats: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch quota stats",
            )
                .into_response();
        }
    };

    match render_stats(&QuotaStatsView::from_snapshot(&snapshot)) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render stats page: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render stats page",
            )
                .into_response()
        }
    }
}
