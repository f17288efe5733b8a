//! Metrics collection for observability
//!
//! Prometheus metrics for settlement runs, one registry per engine.
//!
//! # Metrics
//!
//! - `settlement_runs_total` - Completed settlement runs
//! - `settlement_rejected_total` - Runs refused (in progress, incomplete round)
//! - `settlement_payments_total` - Gross payments generated
//! - `settlement_transfers_total` - Netted transfers produced
//! - `settlement_run_duration_seconds` - Histogram of run latencies

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Completed runs
    pub runs_total: IntCounter,

    /// Refused runs
    pub rejected_total: IntCounter,

    /// Gross payments generated
    pub payments_total: IntCounter,

    /// Transfers produced
    pub transfers_total: IntCounter,

    /// Run duration histogram
    pub run_duration: Histogram,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("runs_total", &self.runs_total.get())
            .field("rejected_total", &self.rejected_total.get())
            .field("payments_total", &self.payments_total.get())
            .field("transfers_total", &self.transfers_total.get())
            .finish()
    }
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let runs_total = IntCounter::new("settlement_runs_total", "Completed settlement runs")?;
        registry.register(Box::new(runs_total.clone()))?;

        let rejected_total =
            IntCounter::new("settlement_rejected_total", "Settlement runs refused")?;
        registry.register(Box::new(rejected_total.clone()))?;

        let payments_total =
            IntCounter::new("settlement_payments_total", "Gross payments generated")?;
        registry.register(Box::new(payments_total.clone()))?;

        let transfers_total =
            IntCounter::new("settlement_transfers_total", "Netted transfers produced")?;
        registry.register(Box::new(transfers_total.clone()))?;

        let run_duration = Histogram::with_opts(
            HistogramOpts::new(
                "settlement_run_duration_seconds",
                "Histogram of settlement run latencies",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.010, 0.050, 0.100, 0.500, 1.0]),
        )?;
        registry.register(Box::new(run_duration.clone()))?;

        Ok(Self {
            runs_total,
            rejected_total,
            payments_total,
            transfers_total,
            run_duration,
            registry,
        })
    }

    /// Record a completed run
    pub fn record_run(&self, payments: usize, transfers: usize, duration_secs: f64) {
        self.runs_total.inc();
        self.payments_total.inc_by(payments as u64);
        self.transfers_total.inc_by(transfers as u64);
        self.run_duration.observe(duration_secs);
    }

    /// Record a refused run
    pub fn record_rejected(&self) {
        self.rejected_total.inc();
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
