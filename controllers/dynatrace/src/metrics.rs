//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! - `dynatrace_provider_reconciliations_total{kind,result}`
//! - `dynatrace_provider_reconciliation_errors_total{kind}`
//! - `dynatrace_provider_reconciliation_duration_seconds{kind}`
//! - `dynatrace_provider_external_operations_total{kind,operation,result}`

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::sync::{LazyLock, OnceLock};

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static METRICS: OnceLock<Metrics> = OnceLock::new();

struct Metrics {
    reconciliations: IntCounterVec,
    reconciliation_errors: IntCounterVec,
    reconciliation_duration: HistogramVec,
    external_operations: IntCounterVec,
}

impl Metrics {
    fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let reconciliations = IntCounterVec::new(
            Opts::new("dynatrace_provider_reconciliations_total", "Total number of reconciliations"),
            &["kind", "result"],
        )?;
        let reconciliation_errors = IntCounterVec::new(
            Opts::new("dynatrace_provider_reconciliation_errors_total", "Total number of reconciliation errors"),
            &["kind"],
        )?;
        let reconciliation_duration = HistogramVec::new(
            HistogramOpts::new(
                "dynatrace_provider_reconciliation_duration_seconds",
                "Duration of reconciliation in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
            &["kind"],
        )?;
        let external_operations = IntCounterVec::new(
            Opts::new(
                "dynatrace_provider_external_operations_total",
                "Total number of Dynatrace Settings API operations",
            ),
            &["kind", "operation", "result"],
        )?;

        registry.register(Box::new(reconciliations.clone()))?;
        registry.register(Box::new(reconciliation_errors.clone()))?;
        registry.register(Box::new(reconciliation_duration.clone()))?;
        registry.register(Box::new(external_operations.clone()))?;

        Ok(Self {
            reconciliations,
            reconciliation_errors,
            reconciliation_duration,
            external_operations,
        })
    }
}

/// Register all metrics with the global registry; later calls are no-ops
pub fn register_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }
    let metrics = Metrics::new(&REGISTRY)?;
    let _ = METRICS.set(metrics);
    Ok(())
}

pub fn record_reconciliation(kind: &str, success: bool, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.reconciliations
            .with_label_values(&[kind, if success { "success" } else { "error" }])
            .inc();
        if !success {
            m.reconciliation_errors.with_label_values(&[kind]).inc();
        }
        m.reconciliation_duration.with_label_values(&[kind]).observe(duration_secs);
    }
}

pub fn record_external_operation(kind: &str, operation: &str, success: bool) {
    if let Some(m) = METRICS.get() {
        m.external_operations
            .with_label_values(&[kind, operation, if success { "success" } else { "error" }])
            .inc();
    }
}
