//! # Canonical Account Addresses
//!
//! | Account | Seeds |
//! |---------|-------|
//! | Global Ledger | `"global"` |
//! | Round | `"round"`, round id (u64 LE) |
//! | Pot | `"pot"`, round id (u64 LE) |
//!
//! Every handler checks supplied account references against these before
//! anything else, so a caller cannot substitute a look-alike account.

use super::value_objects::{round_id_seed, Address, RoundId, GLOBAL_SEED, POT_SEED, ROUND_SEED};
use lb_01_ledger_runtime::{derive_address, RuntimeError};

#[must_use]
pub fn global_ledger_seeds() -> [&'static [u8]; 1] {
    [GLOBAL_SEED]
}

pub fn global_ledger_address(program_id: &Address) -> Result<Address, RuntimeError> {
    derive_address(program_id, &global_ledger_seeds())
}

pub fn round_address(program_id: &Address, round_id: RoundId) -> Result<Address, RuntimeError> {
    derive_address(program_id, &[ROUND_SEED, &round_id_seed(round_id)])
}

pub fn pot_address(program_id: &Address, round_id: RoundId) -> Result<Address, RuntimeError> {
    derive_address(program_id, &[POT_SEED, &round_id_seed(round_id)])
}

/// Fail with `AddressMismatch` unless `supplied` is `expected`.
pub fn require_canonical(expected: Address, supplied: &Address) -> Result<(), RuntimeError> {
    if expected != *supplied {
        return Err(RuntimeError::AddressMismatch {
            expected,
            actual: *supplied,
        });
    }
    Ok(())
}
