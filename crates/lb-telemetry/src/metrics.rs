//! Prometheus metrics for LastBid.
//!
//! All metrics follow the naming convention: `lb_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: operations by outcome, lamports moved, rounds closed
//! - **Histogram**: transaction execution time

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Instant;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ROUND PROGRAM METRICS
    // =========================================================================

    /// Operations by instruction name and outcome (committed/rejected)
    pub static ref OPERATIONS: CounterVec = CounterVec::new(
        Opts::new("lb_round_operations_total", "Round program operations by outcome"),
        &["instruction", "outcome"]
    ).expect("metric creation failed");

    /// Lamports deposited into pots
    pub static ref LAMPORTS_DEPOSITED: Counter = Counter::new(
        "lb_round_lamports_deposited_total",
        "Total lamports deposited by joins"
    ).expect("metric creation failed");

    /// Lamports paid out to winners
    pub static ref LAMPORTS_PAID_OUT: Counter = Counter::new(
        "lb_round_lamports_paid_out_total",
        "Total lamports paid out by claims"
    ).expect("metric creation failed");

    /// Rounds closed
    pub static ref ROUNDS_CLOSED: Counter = Counter::new(
        "lb_round_rounds_closed_total",
        "Total number of rounds closed"
    ).expect("metric creation failed");

    // =========================================================================
    // RUNTIME METRICS
    // =========================================================================

    /// Transaction execution time, lock wait included
    pub static ref OPERATION_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "lb_runtime_transaction_duration_seconds",
            "Time spent executing a transaction"
        ).buckets(vec![0.000_05, 0.000_1, 0.000_25, 0.000_5, 0.001, 0.002_5, 0.005, 0.01, 0.05, 0.1])
    ).expect("metric creation failed");
}

/// Handle to the registry the metrics live in.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Metrics that are already registered are skipped, so repeated calls
/// succeed.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(OPERATIONS.clone()),
        Box::new(LAMPORTS_DEPOSITED.clone()),
        Box::new(LAMPORTS_PAID_OUT.clone()),
        Box::new(ROUNDS_CLOSED.clone()),
        Box::new(OPERATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

// =============================================================================
// RECORDING HELPERS
// =============================================================================

/// Count one executed instruction.
pub fn record_operation(instruction: &str, outcome: &str) {
    OPERATIONS.with_label_values(&[instruction, outcome]).inc();
}

#[allow(clippy::cast_precision_loss)]
pub fn record_deposit(lamports: u64) {
    LAMPORTS_DEPOSITED.inc_by(lamports as f64);
}

#[allow(clippy::cast_precision_loss)]
pub fn record_payout(lamports: u64) {
    LAMPORTS_PAID_OUT.inc_by(lamports as f64);
}

pub fn record_round_closed() {
    ROUNDS_CLOSED.inc();
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    #[must_use]
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
