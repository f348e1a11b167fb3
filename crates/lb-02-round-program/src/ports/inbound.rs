//! # Driving Ports (API - Inbound)
//!
//! The interface clients use to drive the round program. Every mutating
//! call builds the canonical transaction for the caller and submits it
//! through [`RoundProgramApi::process_transaction`], so the typed API and
//! raw transactions share one validation path.

use crate::domain::entities::{GlobalLedger, Pot, Round, RoundStatus};
use crate::domain::value_objects::{Address, Lamports, RoundId};
use crate::errors::RoundError;
use crate::events::Receipt;
use lb_01_ledger_runtime::Transaction;

/// Primary API of the round program.
///
/// ## Usage
///
/// ```ignore
/// api.open_ledger(&admin)?;
/// api.start_round(&admin, 1_000_000, 3_600)?;
/// api.join(&player, 0, 1_000_000)?;
/// ```
pub trait RoundProgramApi: Send + Sync {
    /// Execute an authenticated transaction addressed to this program.
    ///
    /// The transaction either commits completely and returns a receipt, or
    /// fails and leaves every account unchanged.
    fn process_transaction(&self, tx: &Transaction) -> Result<Receipt, RoundError>;

    /// Create the global ledger with `caller` as authority.
    fn open_ledger(&self, caller: &Address) -> Result<Receipt, RoundError>;

    /// Open the next round. Only the authority may call this.
    fn start_round(
        &self,
        caller: &Address,
        entry_amount: Lamports,
        round_duration: i64,
    ) -> Result<Receipt, RoundError>;

    /// Deposit `amount` into round `round_id` and become its leader.
    fn join(&self, caller: &Address, round_id: RoundId, amount: Lamports)
        -> Result<Receipt, RoundError>;

    /// Close round `round_id` once its countdown has elapsed. `caller` only
    /// signs; it needs no special role.
    fn close_round(&self, caller: &Address, round_id: RoundId) -> Result<Receipt, RoundError>;

    /// Pay the pot of a closed round to its leader.
    fn claim(&self, caller: &Address, round_id: RoundId) -> Result<Receipt, RoundError>;

    // =========================================================================
    // QUERIES (read committed state, never lock)
    // =========================================================================

    fn global_ledger(&self) -> Result<Option<GlobalLedger>, RoundError>;

    fn round(&self, round_id: RoundId) -> Result<Option<Round>, RoundError>;

    fn pot(&self, round_id: RoundId) -> Result<Option<Pot>, RoundError>;

    /// Summary of a round at the current ledger time.
    fn round_status(&self, round_id: RoundId) -> Result<Option<RoundStatus>, RoundError>;
}
