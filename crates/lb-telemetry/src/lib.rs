//! # LastBid Telemetry
//!
//! Observability for the LastBid runtime and round program.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber`, pretty for
//!   development or JSON for log shippers
//! - **Metrics**: Prometheus counters and histograms in a process-wide
//!   registry, exported in text format by [`encode_metrics`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lb_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // spans and counters recorded from here on are collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LB_SERVICE_NAME` | `lastbid` | Service name attached to log lines |
//! | `LB_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `LB_JSON_LOGS` | `false` | Emit JSON instead of pretty logs |
//! | `LB_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |
//! | `LB_NETWORK` | `localnet` | Network label |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingHandle};
pub use metrics::{encode_metrics, register_metrics, MetricsHandle};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the process.
/// Calling this twice is harmless: the second call keeps the subscriber
/// installed by the first.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logging = init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        network = %config.network,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _logging: logging,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingHandle,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry");
    }
}
