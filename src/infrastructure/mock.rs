use crate::domain::ports::UsageReportService;
use crate::domain::quota::{UsageEntry, UsageParameter, UsageReport};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// Scripted usage-report source for tests.
///
/// Dates configured via the builders succeed; every other date fails the way
/// an unpublished report does. All incoming calls are recorded.
#[derive(Default)]
pub struct MockUsageReportService {
    reports: HashMap<NaiveDate, Vec<UsageParameter>>,
    empty_dates: HashSet<NaiveDate>,
    calls: Mutex<Vec<NaiveDate>>,
}

impl MockUsageReportService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(self, date: NaiveDate, total_quota_mb: u64, used_quota_mb: u64) -> Self {
        self.with_parameters(
            date,
            vec![
                ("accounts:total_quota_in_mb", total_quota_mb),
                ("accounts:used_quota_in_mb", used_quota_mb),
            ],
        )
    }

    pub fn with_parameters(mut self, date: NaiveDate, parameters: Vec<(&str, u64)>) -> Self {
        self.reports.insert(
            date,
            parameters
                .into_iter()
                .map(|(name, value)| UsageParameter {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        );
        self
    }

    pub fn with_empty_report(mut self, date: NaiveDate) -> Self {
        self.empty_dates.insert(date);
        self
    }

    pub async fn calls(&self) -> Vec<NaiveDate> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl UsageReportService for MockUsageReportService {
    async fn daily_report(&self, date: NaiveDate) -> Result<UsageReport> {
        self.calls.lock().await.push(date);

        if self.empty_dates.contains(&date) {
            return Ok(UsageReport {
                date,
                entries: Vec::new(),
            });
        }

        match self.reports.get(&date) {
            Some(parameters) => Ok(UsageReport {
                date,
                entries: vec![UsageEntry {
                    parameters: parameters.clone(),
                }],
            }),
            None => anyhow::bail!("no report published for {date}"),
        }
    }
}
