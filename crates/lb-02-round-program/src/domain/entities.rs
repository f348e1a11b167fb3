//! # Domain Entities
//!
//! The three account records of the round program.
//!
//! ## Type Decisions
//!
//! - `leader: Option<Address>` - A round without joins has no leader. No
//!   address value is reserved to mean "unset".
//! - `last_join_time: Option<UnixTimestamp>` - Same reasoning; the countdown
//!   anchors on `started_at` until the first join.
//! - `round_duration: i64` - Compared against differences of signed ledger
//!   timestamps, so it shares their type.
//! - `SPACE` - Fixed account size: 8-byte discriminator plus the bincode
//!   encoding of the record with every `Option` populated.

use super::value_objects::{Address, Lamports, RoundId, RoundPhase, UnixTimestamp};
use serde::{Deserialize, Serialize};

/// Bytes of the account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

// =============================================================================
// GLOBAL LEDGER
// =============================================================================

/// Singleton tracking the administrator and the round sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalLedger {
    /// Administrator allowed to start rounds. Set once.
    pub authority: Address,
    /// Id the next started round receives.
    pub next_round_id: RoundId,
    /// Round currently open, if any.
    pub active_round_id: Option<RoundId>,
}

impl GlobalLedger {
    /// discriminator + authority + next_round_id + Option<u64>
    pub const SPACE: usize = DISCRIMINATOR_LEN + 32 + 8 + (1 + 8);

    #[must_use]
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            next_round_id: 0,
            active_round_id: None,
        }
    }

    #[must_use]
    pub fn has_active_round(&self) -> bool {
        self.active_round_id.is_some()
    }
}

// =============================================================================
// ROUND
// =============================================================================

/// State of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub round_id: RoundId,
    /// Most recent accepted joiner.
    pub leader: Option<Address>,
    /// Number of accepted joins.
    pub join_count: u64,
    pub is_active: bool,
    /// Monotonic: once set the round is terminal.
    pub has_closed: bool,
    /// Ledger time the round was started.
    pub started_at: UnixTimestamp,
    pub last_join_time: Option<UnixTimestamp>,
    /// Seconds of inactivity after which the round can be closed.
    pub round_duration: i64,
}

impl Round {
    /// discriminator + round_id + Option<Address> + join_count + 2 flags
    /// + started_at + Option<i64> + round_duration
    pub const SPACE: usize = DISCRIMINATOR_LEN + 8 + (1 + 32) + 8 + 1 + 1 + 8 + (1 + 8) + 8;

    #[must_use]
    pub fn new(round_id: RoundId, round_duration: i64, now: UnixTimestamp) -> Self {
        Self {
            round_id,
            leader: None,
            join_count: 0,
            is_active: true,
            has_closed: false,
            started_at: now,
            last_join_time: None,
            round_duration,
        }
    }

    /// Timestamp the countdown runs from.
    #[must_use]
    pub fn countdown_anchor(&self) -> UnixTimestamp {
        self.last_join_time.unwrap_or(self.started_at)
    }

    /// Earliest time `close_round` succeeds.
    #[must_use]
    pub fn deadline(&self) -> UnixTimestamp {
        self.countdown_anchor().saturating_add(self.round_duration)
    }

    /// Time-gate of `close_round`. Saturating so extreme timestamps cannot
    /// wrap into an early close.
    #[must_use]
    pub fn countdown_elapsed(&self, now: UnixTimestamp) -> bool {
        now.saturating_sub(self.countdown_anchor()) >= self.round_duration
    }

    #[must_use]
    pub fn accepts_joins(&self) -> bool {
        self.is_active && !self.has_closed
    }

    #[must_use]
    pub fn is_leader(&self, address: &Address) -> bool {
        self.leader.as_ref() == Some(address)
    }

    /// Lifecycle phase at `now`, given the escrow balance.
    #[must_use]
    pub fn phase(&self, pot_balance: Lamports, now: UnixTimestamp) -> RoundPhase {
        if self.has_closed {
            if self.leader.is_some() && pot_balance == 0 {
                RoundPhase::Claimed
            } else {
                RoundPhase::Closed
            }
        } else if self.countdown_elapsed(now) {
            RoundPhase::Expired
        } else if self.leader.is_none() {
            RoundPhase::AwaitingFirstJoin
        } else {
            RoundPhase::Open
        }
    }
}

// =============================================================================
// POT
// =============================================================================

/// Escrow accumulating the deposits of one round.
///
/// `balance` tracks deposits only. The account's lamports additionally hold
/// the rent-exempt reserve, which is never paid out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub round_id: RoundId,
    /// Administrator that opened the round and funded the reserve.
    pub authority: Address,
    pub balance: Lamports,
    /// Exact deposit every join must pay.
    pub entry_amount: Lamports,
}

impl Pot {
    /// discriminator + round_id + authority + balance + entry_amount
    pub const SPACE: usize = DISCRIMINATOR_LEN + 8 + 32 + 8 + 8;

    #[must_use]
    pub fn new(round_id: RoundId, authority: Address, entry_amount: Lamports) -> Self {
        Self {
            round_id,
            authority,
            balance: 0,
            entry_amount,
        }
    }
}

// =============================================================================
// ROUND STATUS (query view)
// =============================================================================

/// Read-only summary of a round for clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub round_id: RoundId,
    pub phase: RoundPhase,
    pub leader: Option<Address>,
    pub join_count: u64,
    pub entry_amount: Lamports,
    pub pot_balance: Lamports,
    /// Earliest close time.
    pub deadline: UnixTimestamp,
    /// Seconds until the deadline, zero once it has passed.
    pub seconds_remaining: i64,
}

impl RoundStatus {
    #[must_use]
    pub fn new(round: &Round, pot: &Pot, now: UnixTimestamp) -> Self {
        let deadline = round.deadline();
        Self {
            round_id: round.round_id,
            phase: round.phase(pot.balance, now),
            leader: round.leader,
            join_count: round.join_count,
            entry_amount: pot.entry_amount,
            pot_balance: pot.balance,
            deadline,
            seconds_remaining: deadline.saturating_sub(now).max(0),
        }
    }
}
