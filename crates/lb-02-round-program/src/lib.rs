//! # LB-02 Round Program - Last-Bidder-Wins Timed Rounds
//!
//! **Subsystem ID:** 2
//! **Runs on:** `lb-01-ledger-runtime`
//!
//! ## Purpose
//!
//! An administrator opens a round with a fixed entry deposit and a countdown.
//! Anyone may join by paying exactly the deposit, which makes them the leader
//! and restarts the countdown. Once the countdown elapses anyone may close
//! the round, and the leader at that moment claims the whole pot.
//!
//! ## Accounts
//!
//! | Account | Seeds | Written by |
//! |---------|-------|------------|
//! | `GlobalLedger` | `"global"` | open_ledger, start_round, close_round |
//! | `Round` | `"round"`, id | start_round, join, close_round |
//! | `Pot` | `"pot"`, id | start_round, join, claim |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One active round at most, ledger agrees | `domain/invariants.rs` - `check_ledger_consistency_invariant()` |
//! | Closed rounds are terminal | `domain/invariants.rs` - `check_round_flags_invariant()` |
//! | Pot holds `entry_amount * join_count` until claimed | `domain/invariants.rs` - `check_pot_conservation_invariant()` |
//! | Supplied accounts are the canonical ones | `domain/derivation.rs` - `require_canonical()` |
//! | All-or-nothing execution | `service.rs` - one `UnitOfWork` per transaction |
//!
//! ## Round Lifecycle
//!
//! ```text
//! start_round ─→ [Open, no leader] ─join─→ [Open, leader] ─join─→ ...
//!                        │                       │
//!                        └──── deadline passed ──┴─→ close_round (anyone)
//!                                                        │
//!                                      [Closed] ─claim (leader)─→ [Claimed]
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use lb_02_round_program::prelude::*;
//!
//! let service = RoundProgramService::new(ledger, SystemClock, ServiceConfig::from_env());
//! service.open_ledger(&admin)?;
//! service.start_round(&admin, 1_000_000, 3_600)?;
//! service.join(&player, 0, 1_000_000)?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod instruction;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{GlobalLedger, Pot, Round, RoundStatus};

    // Value objects
    pub use crate::domain::value_objects::{
        Address, Lamports, RoundId, RoundParams, RoundPhase, UnixTimestamp,
    };

    // Address derivation
    pub use crate::domain::derivation::{global_ledger_address, pot_address, round_address};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantContext, InvariantViolation,
    };

    // Instructions
    pub use crate::instruction::{
        claim_instruction, close_round_instruction, join_instruction, open_ledger_instruction,
        start_round_instruction, RoundInstruction,
    };

    // Ports
    pub use crate::ports::inbound::RoundProgramApi;
    pub use crate::ports::outbound::{AccountStore, Clock};

    // Events
    pub use crate::events::{Receipt, RoundEvent};

    // Errors
    pub use crate::errors::{RoundError, RoundResult};

    // Service
    pub use crate::config::ServiceConfig;
    pub use crate::service::{RoundProgramService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Round Program";

// =============================================================================
// TESTS
// =============================================================================
