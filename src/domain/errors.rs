use chrono::NaiveDate;
use thiserror::Error;

/// Errors related to usage-report retrieval and extraction
#[derive(Debug, Error)]
pub enum QuotaError {
    #[error("usage report for {date} contains no entries")]
    EmptyReport { date: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_formatting() {
        let error = QuotaError::EmptyReport {
            date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
        };

        let msg = error.to_string();
        assert!(msg.contains("2026-08-03"));
        assert!(msg.contains("no entries"));
    }
}
