//! # Domain Services
//!
//! Pure state-transition functions of the round program.
//!
//! Each handler takes the decoded account states, the authenticated caller,
//! the instruction arguments and the ledger time, and returns either the new
//! states plus the fund movement to perform, or the first failed
//! precondition. Handlers never touch the ledger; the service applies the
//! returned transition inside a unit of work.
//!
//! - NO I/O operations
//! - NO clock reads (time is an argument)
//! - Every precondition is checked before any field is changed

use crate::domain::entities::{GlobalLedger, Pot, Round};
use crate::domain::value_objects::{Address, Lamports, RoundParams, UnixTimestamp};
use crate::errors::RoundError;

// =============================================================================
// FUND MOVEMENTS
// =============================================================================

/// Lamport movement a transition requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FundMovement {
    /// Caller's wallet → Pot.
    Deposit { from: Address, amount: Lamports },
    /// Pot → caller's wallet.
    Payout { to: Address, amount: Lamports },
}

// =============================================================================
// TRANSITIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartRoundTransition {
    pub ledger: GlobalLedger,
    pub round: Round,
    pub pot: Pot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinTransition {
    pub round: Round,
    pub pot: Pot,
    pub movement: FundMovement,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseRoundTransition {
    pub ledger: GlobalLedger,
    pub round: Round,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimTransition {
    pub pot: Pot,
    pub movement: FundMovement,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Initial ledger state; the caller becomes the authority.
#[must_use]
pub fn open_ledger(caller: Address) -> GlobalLedger {
    GlobalLedger::new(caller)
}

/// Open round `ledger.next_round_id`.
///
/// # Errors
///
/// In order: `Unauthorized`, `RoundAlreadyActive`, `InvalidEntryAmount`,
/// `InvalidRoundDuration`, `ArithmeticOverflow`.
pub fn start_round(
    ledger: &GlobalLedger,
    caller: &Address,
    params: RoundParams,
    now: UnixTimestamp,
) -> Result<StartRoundTransition, RoundError> {
    if ledger.authority != *caller {
        return Err(RoundError::Unauthorized);
    }
    if ledger.has_active_round() {
        return Err(RoundError::RoundAlreadyActive);
    }
    if params.entry_amount == 0 {
        return Err(RoundError::InvalidEntryAmount);
    }
    if params.round_duration <= 0 {
        return Err(RoundError::InvalidRoundDuration(params.round_duration));
    }

    let round_id = ledger.next_round_id;
    let next_round_id = round_id
        .checked_add(1)
        .ok_or(RoundError::ArithmeticOverflow)?;

    Ok(StartRoundTransition {
        ledger: GlobalLedger {
            authority: ledger.authority,
            next_round_id,
            active_round_id: Some(round_id),
        },
        round: Round::new(round_id, params.round_duration, now),
        pot: Pot::new(round_id, *caller, params.entry_amount),
    })
}

/// Pay the entry deposit and take the lead.
///
/// Joins after the deadline are accepted as long as nobody has closed the
/// round; the countdown then restarts from the new join.
///
/// # Errors
///
/// In order: `RoundNotActive`, `IncorrectDepositAmount`, `AlreadyLeader`,
/// `ArithmeticOverflow`.
pub fn join(
    round: &Round,
    pot: &Pot,
    caller: &Address,
    amount: Lamports,
    now: UnixTimestamp,
) -> Result<JoinTransition, RoundError> {
    if !round.accepts_joins() {
        return Err(RoundError::RoundNotActive);
    }
    if amount != pot.entry_amount {
        return Err(RoundError::IncorrectDepositAmount {
            expected: pot.entry_amount,
            actual: amount,
        });
    }
    if round.is_leader(caller) {
        return Err(RoundError::AlreadyLeader);
    }

    let balance = pot
        .balance
        .checked_add(amount)
        .ok_or(RoundError::ArithmeticOverflow)?;
    let join_count = round
        .join_count
        .checked_add(1)
        .ok_or(RoundError::ArithmeticOverflow)?;

    Ok(JoinTransition {
        round: Round {
            leader: Some(*caller),
            join_count,
            last_join_time: Some(now),
            ..round.clone()
        },
        pot: Pot {
            balance,
            ..pot.clone()
        },
        movement: FundMovement::Deposit {
            from: *caller,
            amount,
        },
    })
}

/// Close an expired round. Anyone may call this.
///
/// There is no scheduler: the round stays open past its deadline until some
/// caller submits this transition.
///
/// # Errors
///
/// `RoundNotActive` if the round is not the ledger's open round,
/// `RoundNotEnded` before the deadline.
pub fn close_round(
    ledger: &GlobalLedger,
    round: &Round,
    now: UnixTimestamp,
) -> Result<CloseRoundTransition, RoundError> {
    if !round.is_active || ledger.active_round_id != Some(round.round_id) {
        return Err(RoundError::RoundNotActive);
    }
    if !round.countdown_elapsed(now) {
        return Err(RoundError::RoundNotEnded);
    }

    Ok(CloseRoundTransition {
        ledger: GlobalLedger {
            active_round_id: None,
            ..ledger.clone()
        },
        round: Round {
            is_active: false,
            has_closed: true,
            ..round.clone()
        },
    })
}

/// Pay the whole deposit balance to the leader of a closed round.
///
/// # Errors
///
/// In order: `RoundNotEnded`, `NotLeader` (also when the round has no
/// leader), `NothingToClaim`.
pub fn claim(round: &Round, pot: &Pot, caller: &Address) -> Result<ClaimTransition, RoundError> {
    if !round.has_closed {
        return Err(RoundError::RoundNotEnded);
    }
    if !round.is_leader(caller) {
        return Err(RoundError::NotLeader);
    }
    if pot.balance == 0 {
        return Err(RoundError::NothingToClaim);
    }

    Ok(ClaimTransition {
        pot: Pot {
            balance: 0,
            ..pot.clone()
        },
        movement: FundMovement::Payout {
            to: *caller,
            amount: pot.balance,
        },
    })
}
