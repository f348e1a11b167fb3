//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log lines
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or an
    /// `EnvFilter` directive string
    pub log_level: String,

    /// Whether to write logs to stdout
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Network label (localnet, devnet, testnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "lastbid".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "localnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LB_SERVICE_NAME`: Service name (default: lastbid)
    /// - `LB_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LB_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `LB_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `LB_NETWORK`: Network name (default: localnet)
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let is_container = env::var("KUBERNETES_SERVICE_HOST").is_ok();

        Self {
            service_name: env::var("LB_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("LB_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: parse_flag("LB_CONSOLE_OUTPUT").unwrap_or(defaults.console_output),

            json_logs: parse_flag("LB_JSON_LOGS").unwrap_or(is_container),

            network: env::var("LB_NETWORK").unwrap_or(defaults.network),
        }
    }

    /// Create a development configuration with debug logging.
    #[must_use]
    pub fn development() -> Self {
        Self {
            log_level: "debug".to_string(),
            network: "devnet".to_string(),
            ..Self::default()
        }
    }
}

fn parse_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
