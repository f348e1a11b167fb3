//! Subscriber setup for structured logs.
//!
//! Events carry the span fields the runtime and round program attach
//! (`signer`, `invocation_id`, instruction name) so a JSON line can be
//! correlated with the transaction receipt that produced it.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Handle returned once logging is configured.
#[derive(Debug)]
pub struct LoggingHandle {
    /// `false` if another subscriber was already installed.
    pub installed: bool,
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.log_level`. If a global
/// subscriber already exists it is kept and `installed` is `false`.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingHandle, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let result = if !config.console_output {
        tracing_subscriber::registry().with(env_filter).try_init()
    } else if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_level(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    Ok(LoggingHandle {
        installed: result.is_ok(),
    })
}
