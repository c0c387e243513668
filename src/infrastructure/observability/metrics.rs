//! Prometheus metrics for the quota exporter.
//!
//! All metrics use the `workspace_quota_` prefix. The quota gauges are
//! collected per scrape by querying the reporting API; a scrape during
//! upstream failure still yields a well-formed exposition.

use crate::application::fetcher::QuotaFetcher;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, IntCounter, Opts, Registry, TextEncoder};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tracing::error;

/// Scrape-driven collector for the three quota gauges.
///
/// Descriptor enumeration (`desc`) is static and always succeeds; value
/// collection (`collect`) performs one quota fetch per scrape.
pub struct QuotaCollector {
    fetcher: Arc<QuotaFetcher>,
    report_timestamp: Gauge,
    total_bytes: Gauge,
    used_bytes: Gauge,
    scrape_errors: IntCounter,
    scrape_lock: Mutex<()>,
}

impl QuotaCollector {
    pub fn new(fetcher: Arc<QuotaFetcher>) -> anyhow::Result<Self> {
        let report_timestamp = Gauge::with_opts(Opts::new(
            "workspace_quota_report_timestamp_seconds",
            "Unix time the quota figures were fetched",
        ))?;

        let total_bytes = Gauge::with_opts(Opts::new(
            "workspace_quota_total_bytes",
            "Total storage quota in bytes",
        ))?;

        let used_bytes = Gauge::with_opts(Opts::new(
            "workspace_quota_used_bytes",
            "Used storage quota in bytes",
        ))?;

        let scrape_errors = IntCounter::with_opts(Opts::new(
            "workspace_quota_scrape_errors_total",
            "Scrapes that failed to fetch a usage report",
        ))?;

        Ok(Self {
            fetcher,
            report_timestamp,
            total_bytes,
            used_bytes,
            scrape_errors,
            scrape_lock: Mutex::new(()),
        })
    }
}

impl Collector for QuotaCollector {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.report_timestamp.desc();
        descs.extend(self.total_bytes.desc());
        descs.extend(self.used_bytes.desc());
        descs.extend(self.scrape_errors.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        // Serializes concurrent scrapes so one scrape's gauge values cannot
        // mix with another's.
        let _guard = self.scrape_lock.lock().unwrap_or_else(|e| e.into_inner());

        let fetched =
            tokio::task::block_in_place(|| Handle::current().block_on(self.fetcher.fetch()));

        match fetched {
            Ok(snapshot) => {
                self.report_timestamp
                    .set(snapshot.fetched_at.timestamp() as f64);
                self.total_bytes.set(snapshot.total_quota_bytes() as f64);
                self.used_bytes.set(snapshot.used_quota_bytes() as f64);

                let mut families = self.scrape_errors.collect();
                families.extend(self.report_timestamp.collect());
                families.extend(self.total_bytes.collect());
                families.extend(self.used_bytes.collect());
                families
            }
            Err(e) => {
                error!("Quota fetch failed during scrape: {:#}", e);
                self.scrape_errors.inc();
                self.scrape_errors.collect()
            }
        }
    }
}

/// Registry wrapper exposed to the metrics endpoint.
#[derive(Clone)]
pub struct QuotaMetrics {
    registry: Arc<Registry>,
}

impl QuotaMetrics {
    pub fn new(fetcher: Arc<QuotaFetcher>) -> anyhow::Result<Self> {
        let registry = Registry::new();
        registry.register(Box::new(QuotaCollector::new(fetcher)?))?;

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }
}
