//! Admin SDK customer usage-report client.

use crate::domain::ports::UsageReportService;
use crate::domain::quota::{UsageEntry, UsageParameter, UsageReport};
use crate::infrastructure::google::auth::GoogleCredentialProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const ADMIN_REPORTS_BASE_URL: &str = "https://admin.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageReportsResponse {
    #[serde(default)]
    usage_reports: Vec<RawUsageReport>,
}

#[derive(Debug, Deserialize)]
struct RawUsageReport {
    #[serde(default)]
    parameters: Vec<RawParameter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParameter {
    name: String,
    /// int64 parameters arrive as decimal strings.
    #[serde(default)]
    int_value: Option<String>,
}

pub struct AdminReportsClient {
    client: Client,
    credentials: Arc<GoogleCredentialProvider>,
    base_url: String,
}

impl AdminReportsClient {
    pub fn new(credentials: Arc<GoogleCredentialProvider>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            credentials,
            base_url: ADMIN_REPORTS_BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl UsageReportService for AdminReportsClient {
    async fn daily_report(&self, date: NaiveDate) -> Result<UsageReport> {
        debug!("Requesting customer usage report for {}", date);

        let token = self.credentials.access_token().await?;
        let url = format!(
            "{}/admin/reports/v1/usage/dates/{}",
            self.base_url,
            date.format("%Y-%m-%d")
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send usage report request")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Admin reports API returned status {} for {}",
                response.status(),
                date
            );
        }

        let body: UsageReportsResponse = response
            .json()
            .await
            .context("Failed to parse usage report response")?;

        Ok(UsageReport {
            date,
            entries: body
                .usage_reports
                .into_iter()
                .map(|entry| UsageEntry {
                    parameters: entry
                        .parameters
                        .into_iter()
                        .filter_map(|p| {
                            let value = p.int_value.as_deref()?.parse().ok()?;
                            Some(UsageParameter {
                                name: p.name,
                                value,
                            })
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}
