use crate::domain::quota::UsageReport;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

// Need async_trait for async functions in traits
#[async_trait]
pub trait UsageReportService: Send + Sync {
    /// Fetch the organization-wide usage report published for `date`.
    async fn daily_report(&self, date: NaiveDate) -> Result<UsageReport>;
}
