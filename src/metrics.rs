//! Prometheus metrics for runtime probes
//!
//! Tracks how probes end, labelled by outcome. The label set is closed
//! (`unreachable`, `no_version`, `version`), so cardinality stays at three
//! time series.

use crate::runtime::VersionOutcome;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector for runtime-probe
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    probes_total: IntCounterVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let probes_total = IntCounterVec::new(
            Opts::new(
                "runtime_probe_probes_total",
                "Total number of runtime version probes by outcome",
            ),
            &["outcome"],
        )?;

        registry.register(Box::new(probes_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            probes_total,
        })
    }

    /// Count one finished probe
    pub fn record_probe(&self, outcome: &VersionOutcome) -> Result<(), prometheus::Error> {
        self.probes_total
            .get_metric_with_label_values(&[outcome.label()])?
            .inc();
        Ok(())
    }

    /// Number of probes recorded with the given outcome label
    pub fn probe_count(&self, label: &str) -> u64 {
        self.probes_total
            .get_metric_with_label_values(&[label])
            .map(|c| c.get())
            .unwrap_or(0)
    }

    /// Render all metrics in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics output is not UTF-8: {}", e)))
    }
}
