//! # Domain Invariants
//!
//! Consistency rules over the program's accounts, evaluated on the
//! post-transition states before a unit of work commits. A violation aborts
//! the transaction; nothing is persisted.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Closed rounds are terminal | `check_round_flags_invariant` |
//! | Leader exists iff someone joined | `check_leader_invariant` |
//! | Pot holds exactly the deposits | `check_pot_conservation_invariant` |
//! | Ledger agrees with the open round | `check_ledger_consistency_invariant` |
//! | Round ids are never reused | `check_round_sequence_invariant` |

use crate::domain::entities::{GlobalLedger, Pot, Round};
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// `has_closed ⇒ !is_active`.
#[must_use]
pub fn check_round_flags_invariant(round: &Round) -> bool {
    !(round.has_closed && round.is_active)
}

/// `leader.is_some() ⇔ join_count > 0`, and a join time exists with a
/// leader.
#[must_use]
pub fn check_leader_invariant(round: &Round) -> bool {
    round.leader.is_some() == (round.join_count > 0)
        && round.leader.is_some() == round.last_join_time.is_some()
}

/// While unclaimed the pot holds `entry_amount * join_count`; after a claim
/// it holds zero, which is only possible once the round has closed.
#[must_use]
pub fn check_pot_conservation_invariant(round: &Round, pot: &Pot) -> bool {
    if round.round_id != pot.round_id {
        return false;
    }
    let expected = pot.entry_amount.checked_mul(round.join_count);
    let claimed = round.has_closed && pot.balance == 0;
    expected == Some(pot.balance) || claimed
}

/// `active_round_id == Some(id)` exactly when round `id` is active.
#[must_use]
pub fn check_ledger_consistency_invariant(ledger: &GlobalLedger, round: &Round) -> bool {
    let ledger_points_here = ledger.active_round_id == Some(round.round_id);
    ledger_points_here == round.is_active
}

/// Every existing round id is below `next_round_id`.
#[must_use]
pub fn check_round_sequence_invariant(ledger: &GlobalLedger, round: &Round) -> bool {
    round.round_id < ledger.next_round_id
}

/// Accounts touched by a transition. Absent accounts are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvariantContext<'a> {
    pub ledger: Option<&'a GlobalLedger>,
    pub round: Option<&'a Round>,
    pub pot: Option<&'a Pot>,
}

/// Check all invariants that apply to `ctx`.
#[must_use]
pub fn check_all_invariants(ctx: &InvariantContext<'_>) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if let Some(round) = ctx.round {
        if !check_round_flags_invariant(round) {
            violations.push(InvariantViolation::ClosedRoundStillActive {
                round_id: round.round_id,
            });
        }
        if !check_leader_invariant(round) {
            violations.push(InvariantViolation::LeaderInconsistent {
                round_id: round.round_id,
                join_count: round.join_count,
            });
        }
        if let Some(pot) = ctx.pot {
            if !check_pot_conservation_invariant(round, pot) {
                violations.push(InvariantViolation::PotNotConserved {
                    round_id: round.round_id,
                    balance: pot.balance,
                    entry_amount: pot.entry_amount,
                    join_count: round.join_count,
                });
            }
        }
        if let Some(ledger) = ctx.ledger {
            if !check_ledger_consistency_invariant(ledger, round) {
                violations.push(InvariantViolation::LedgerOutOfSync {
                    round_id: round.round_id,
                    active_round_id: ledger.active_round_id,
                });
            }
            if !check_round_sequence_invariant(ledger, round) {
                violations.push(InvariantViolation::RoundIdNotAllocated {
                    round_id: round.round_id,
                    next_round_id: ledger.next_round_id,
                });
            }
        }
    }

    InvariantCheckResult { violations }
}

/// Result of checking all invariants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvariantCheckResult {
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for InvariantCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    ClosedRoundStillActive {
        round_id: u64,
    },
    LeaderInconsistent {
        round_id: u64,
        join_count: u64,
    },
    PotNotConserved {
        round_id: u64,
        balance: u64,
        entry_amount: u64,
        join_count: u64,
    },
    LedgerOutOfSync {
        round_id: u64,
        active_round_id: Option<u64>,
    },
    RoundIdNotAllocated {
        round_id: u64,
        next_round_id: u64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClosedRoundStillActive { round_id } => {
                write!(f, "round {round_id} is closed but still active")
            }
            Self::LeaderInconsistent {
                round_id,
                join_count,
            } => write!(
                f,
                "round {round_id} leader does not match join_count {join_count}"
            ),
            Self::PotNotConserved {
                round_id,
                balance,
                entry_amount,
                join_count,
            } => write!(
                f,
                "pot {round_id} holds {balance}, expected {entry_amount} x {join_count}"
            ),
            Self::LedgerOutOfSync {
                round_id,
                active_round_id,
            } => write!(
                f,
                "ledger active round {active_round_id:?} disagrees with round {round_id}"
            ),
            Self::RoundIdNotAllocated {
                round_id,
                next_round_id,
            } => write!(
                f,
                "round {round_id} not below next_round_id {next_round_id}"
            ),
        }
    }
}
