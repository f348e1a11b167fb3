//! Service configuration from environment variables.

use crate::domain::value_objects::Address;
use std::env;
use tracing::warn;

/// Program id used when none is configured.
pub const DEFAULT_PROGRAM_ID: Address = Address::new([
    0x4c, 0x61, 0x73, 0x74, 0x42, 0x69, 0x64, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31,
    0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31, 0x31,
    0x31, 0x31,
]);

/// Round program service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Identity of the program; owner of every account it creates.
    pub program_id: Address,
    /// Run the post-transition invariant checks before every commit.
    pub check_invariants: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            check_invariants: true,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LB_PROGRAM_ID`: 32-byte program id in hex (default: built-in id)
    /// - `LB_CHECK_INVARIANTS`: "false" or "0" disables post-transition checks
    ///   (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let program_id = match env::var("LB_PROGRAM_ID") {
            Ok(value) => value.parse::<Address>().unwrap_or_else(|e| {
                warn!(%value, error = %e, "ignoring invalid LB_PROGRAM_ID");
                defaults.program_id
            }),
            Err(_) => defaults.program_id,
        };
        Self {
            program_id,
            check_invariants: env::var("LB_CHECK_INVARIANTS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
                .unwrap_or(defaults.check_invariants),
        }
    }

    #[must_use]
    pub fn with_program_id(mut self, program_id: Address) -> Self {
        self.program_id = program_id;
        self
    }
}
