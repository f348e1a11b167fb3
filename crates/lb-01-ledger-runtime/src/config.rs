//! Runtime configuration from environment variables.

use crate::domain::Rent;
use std::env;

/// Configuration for the ledger runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Storage billing schedule.
    pub rent: Rent,
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LB_LAMPORTS_PER_BYTE`: Rent-exempt lamports per byte (default: 6960)
    /// - `LB_ACCOUNT_OVERHEAD_BYTES`: Bytes billed per account (default: 128)
    pub fn from_env() -> Self {
        let defaults = Rent::default();
        Self {
            rent: Rent {
                lamports_per_byte: env::var("LB_LAMPORTS_PER_BYTE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.lamports_per_byte),
                account_overhead_bytes: env::var("LB_ACCOUNT_OVERHEAD_BYTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.account_overhead_bytes),
            },
        }
    }

    /// Configuration without storage billing, for simulations.
    pub fn rent_free() -> Self {
        Self { rent: Rent::free() }
    }
}
