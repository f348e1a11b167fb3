//! # Event Schema
//!
//! Events emitted by committed operations. A rejected operation emits
//! nothing; every event in a [`Receipt`] describes state that is already
//! persisted.

use crate::domain::value_objects::{Address, Lamports, RoundId, UnixTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State change announced by the round program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    LedgerOpened {
        authority: Address,
    },
    RoundStarted {
        round_id: RoundId,
        entry_amount: Lamports,
        round_duration: i64,
        started_at: UnixTimestamp,
    },
    Joined {
        round_id: RoundId,
        leader: Address,
        /// Deposit paid by the leader.
        amount: Lamports,
        join_count: u64,
        pot_balance: Lamports,
        /// Earliest close time after this join.
        deadline: UnixTimestamp,
    },
    RoundClosed {
        round_id: RoundId,
        /// `None` if nobody joined.
        winner: Option<Address>,
        join_count: u64,
        /// Signer of the crank transaction.
        closed_by: Address,
    },
    PotClaimed {
        round_id: RoundId,
        winner: Address,
        amount: Lamports,
    },
}

impl RoundEvent {
    /// Round the event belongs to, if any.
    #[must_use]
    pub fn round_id(&self) -> Option<RoundId> {
        match self {
            Self::LedgerOpened { .. } => None,
            Self::RoundStarted { round_id, .. }
            | Self::Joined { round_id, .. }
            | Self::RoundClosed { round_id, .. }
            | Self::PotClaimed { round_id, .. } => Some(*round_id),
        }
    }
}

/// Outcome of a committed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Correlates log lines of one invocation.
    pub invocation_id: Uuid,
    /// Name of the executed instruction.
    pub instruction: String,
    /// Ledger time the operation executed at.
    pub executed_at: UnixTimestamp,
    pub events: Vec<RoundEvent>,
}
