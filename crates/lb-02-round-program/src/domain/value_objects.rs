//! # Value Objects
//!
//! Immutable domain primitives for the round program.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

pub use shared_types::{Address, Lamports, UnixTimestamp};

/// Sequential round identifier. Assigned from `GlobalLedger::next_round_id`
/// and never reused.
pub type RoundId = u64;

// =============================================================================
// SEED TAGS
// =============================================================================

/// Namespace tag of the global ledger singleton.
pub const GLOBAL_SEED: &[u8] = b"global";

/// Namespace tag of per-round state accounts.
pub const ROUND_SEED: &[u8] = b"round";

/// Namespace tag of per-round escrow accounts.
pub const POT_SEED: &[u8] = b"pot";

/// Round id encoded the way it appears in derivation seeds.
#[must_use]
pub fn round_id_seed(round_id: RoundId) -> [u8; 8] {
    round_id.to_le_bytes()
}

// =============================================================================
// ROUND PARAMETERS
// =============================================================================

/// Arguments of `start_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundParams {
    /// Exact deposit every join must pay.
    pub entry_amount: Lamports,
    /// Seconds of inactivity after which the round can be closed.
    pub round_duration: i64,
}

impl RoundParams {
    #[must_use]
    pub fn new(entry_amount: Lamports, round_duration: i64) -> Self {
        Self {
            entry_amount,
            round_duration,
        }
    }
}

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Observable lifecycle position of a round at a given time.
///
/// ```text
/// AwaitingFirstJoin ─join─→ Open ─deadline─→ Expired ─close─→ Closed ─claim─→ Claimed
///        │                                                      ↑
///        └──────────────deadline, close (no leader)─────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Active, nobody has joined yet.
    AwaitingFirstJoin,
    /// Active with a leader, countdown running.
    Open,
    /// Deadline passed but nobody has closed the round yet.
    /// Joins are still accepted in this phase.
    Expired,
    /// Closed; the leader (if any) may claim.
    Closed,
    /// Closed and the pot has been paid out.
    Claimed,
}

impl RoundPhase {
    /// True while `join` can be accepted.
    #[must_use]
    pub fn accepts_joins(&self) -> bool {
        matches!(self, Self::AwaitingFirstJoin | Self::Open | Self::Expired)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AwaitingFirstJoin => "awaiting-first-join",
            Self::Open => "open",
            Self::Expired => "expired",
            Self::Closed => "closed",
            Self::Claimed => "claimed",
        };
        f.write_str(name)
    }
}
