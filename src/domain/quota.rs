use chrono::{DateTime, NaiveDate, Utc};

// ===== Constants =====

/// Bytes per megabyte as the Admin SDK reports quota (binary, 2^20).
pub const BYTES_PER_MB: u64 = 1_048_576;

/// Megabytes per terabyte (binary, 2^20). Used for the stats page display.
pub const MB_PER_TB: f64 = 1_048_576.0;

/// Usage-report parameter carrying the customer's total storage quota in MB.
pub const TOTAL_QUOTA_PARAM: &str = "accounts:total_quota_in_mb";

/// Usage-report parameter carrying the customer's used storage quota in MB.
pub const USED_QUOTA_PARAM: &str = "accounts:used_quota_in_mb";

// ===== Snapshot =====

/// Storage-quota figures extracted from one accepted usage report.
///
/// Built fresh on every fetch and owned by the caller; there is no shared
/// cache between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaSnapshot {
    /// Calendar date (UTC) of the usage report the figures came from.
    pub report_date: NaiveDate,
    /// When this snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
    pub total_quota_mb: u64,
    pub used_quota_mb: u64,
}

impl QuotaSnapshot {
    pub fn total_quota_bytes(&self) -> u64 {
        self.total_quota_mb * BYTES_PER_MB
    }

    pub fn used_quota_bytes(&self) -> u64 {
        self.used_quota_mb * BYTES_PER_MB
    }

    pub fn total_quota_tb(&self) -> f64 {
        self.total_quota_mb as f64 / MB_PER_TB
    }

    pub fn used_quota_tb(&self) -> f64 {
        self.used_quota_mb as f64 / MB_PER_TB
    }

    /// Used share of the total quota in percent.
    ///
    /// A zero total quota yields `f64::NAN` rather than a panic; consumers
    /// render or emit the NaN as-is.
    pub fn percentage_used(&self) -> f64 {
        (self.used_quota_mb as f64 / self.total_quota_mb as f64) * 100.0
    }
}

// ===== Usage report =====

/// One day's usage report as returned by the reporting API.
#[derive(Debug, Clone)]
pub struct UsageReport {
    pub date: NaiveDate,
    pub entries: Vec<UsageEntry>,
}

/// A single usage-report record (the API returns one per customer).
#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub parameters: Vec<UsageParameter>,
}

/// A named numeric parameter inside a usage-report record.
#[derive(Debug, Clone)]
pub struct UsageParameter {
    pub name: String,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total_mb: u64, used_mb: u64) -> QuotaSnapshot {
        QuotaSnapshot {
            report_date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            fetched_at: Utc::now(),
            total_quota_mb: total_mb,
            used_quota_mb: used_mb,
        }
    }

    #[test]
    fn test_byte_conversion_is_binary_mebibytes() {
        let s = snapshot(1_048_576, 524_288);
        assert_eq!(s.total_quota_bytes(), 1_099_511_627_776);
        assert_eq!(s.used_quota_bytes(), 549_755_813_888);
    }

    #[test]
    fn test_terabyte_conversion() {
        let s = snapshot(1_048_576, 524_288);
        assert!((s.total_quota_tb() - 1.0).abs() < f64::EPSILON);
        assert!((s.used_quota_tb() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentage_used() {
        let s = snapshot(1_048_576, 524_288);
        assert!((s.percentage_used() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_total_quota_is_nan_not_panic() {
        let s = snapshot(0, 0);
        assert!(s.percentage_used().is_nan());
    }
}
