//! Quota fetching against the usage-report API.
//!
//! Usage reports are published with a multi-day lag and occasionally skip a
//! day, so candidate dates are probed backward from yesterday until one
//! answers.

use crate::domain::errors::QuotaError;
use crate::domain::ports::UsageReportService;
use crate::domain::quota::{QuotaSnapshot, TOTAL_QUOTA_PARAM, USED_QUOTA_PARAM, UsageReport};
use anyhow::{Context, Result, anyhow};
use chrono::{Days, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Upper bound on probed report dates, starting at yesterday.
pub const REPORT_PROBE_DAYS: u64 = 5;

pub struct QuotaFetcher {
    reports: Arc<dyn UsageReportService>,
}

impl QuotaFetcher {
    pub fn new(reports: Arc<dyn UsageReportService>) -> Self {
        Self { reports }
    }

    /// Fetch the most recent available quota figures.
    ///
    /// Issues one upstream call per candidate date and stops at the first
    /// that succeeds. When all candidates fail, the last error is propagated
    /// with the probe window attached.
    pub async fn fetch(&self) -> Result<QuotaSnapshot> {
        self.fetch_from(Utc::now().date_naive()).await
    }

    pub(crate) async fn fetch_from(&self, today: NaiveDate) -> Result<QuotaSnapshot> {
        let mut last_err = None;

        for offset in 1..=REPORT_PROBE_DAYS {
            let date = today - Days::new(offset);
            match self.reports.daily_report(date).await {
                Ok(report) => {
                    info!("Usage report accepted for {}", report.date);
                    return snapshot_from_report(report);
                }
                Err(e) => {
                    debug!("Usage report for {} unavailable: {:#}", date, e);
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow!("no report dates probed"))).with_context(|| {
            format!("no usage report available within the last {REPORT_PROBE_DAYS} days")
        })
    }
}

fn snapshot_from_report(report: UsageReport) -> Result<QuotaSnapshot> {
    let entry = report
        .entries
        .first()
        .ok_or(QuotaError::EmptyReport { date: report.date })?;

    let mut total_quota_mb = 0;
    let mut used_quota_mb = 0;
    for parameter in &entry.parameters {
        match parameter.name.as_str() {
            TOTAL_QUOTA_PARAM => total_quota_mb = parameter.value,
            USED_QUOTA_PARAM => used_quota_mb = parameter.value,
            _ => {}
        }
    }

    Ok(QuotaSnapshot {
        report_date: report.date,
        fetched_at: Utc::now(),
        total_quota_mb,
        used_quota_mb,
    })
}
