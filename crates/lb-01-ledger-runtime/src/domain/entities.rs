//! # Domain Entities for the Ledger Runtime
//!
//! ## Type Decisions
//!
//! - `lamports: u64` - The native currency never exceeds `u64::MAX` in total,
//!   so every balance and every transfer fits; additions are still checked.
//! - `data: Vec<u8>` - Account data is opaque to the runtime. Its length is
//!   fixed at creation and determines the rent-exempt reserve.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Lamports};

/// Owner of every wallet account.
pub const SYSTEM_PROGRAM_ID: Address = Address::ZERO;

/// A single ledger account.
///
/// Wallets are owned by [`SYSTEM_PROGRAM_ID`] and carry no data. Program
/// accounts are owned by the program that created them; only that program
/// may rewrite their data or debit their lamports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Native currency held by the account.
    pub lamports: Lamports,
    /// Program allowed to mutate this account.
    pub owner: Address,
    /// Program-defined payload.
    pub data: Vec<u8>,
}

impl Account {
    /// A data-less wallet holding `lamports`.
    #[must_use]
    pub fn wallet(lamports: Lamports) -> Self {
        Self {
            lamports,
            owner: SYSTEM_PROGRAM_ID,
            data: Vec::new(),
        }
    }

    /// A program account with zeroed data of `space` bytes.
    #[must_use]
    pub fn program_owned(owner: Address, lamports: Lamports, space: usize) -> Self {
        Self {
            lamports,
            owner,
            data: vec![0u8; space],
        }
    }

    /// True if this account is a plain wallet.
    #[must_use]
    pub fn is_wallet(&self) -> bool {
        self.owner == SYSTEM_PROGRAM_ID
    }
}
