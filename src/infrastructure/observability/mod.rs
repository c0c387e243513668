//! Pull-based observability.
//!
//! Quota gauges are produced on each scrape of the metrics endpoint; nothing
//! is pushed.

pub mod metrics;

pub use metrics::QuotaMetrics;
