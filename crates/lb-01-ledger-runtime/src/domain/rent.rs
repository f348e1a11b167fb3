//! # Account Storage Billing
//!
//! Every program account must hold a rent-exempt reserve proportional to its
//! size. The payer of an account creation funds the reserve; a program can
//! never withdraw below it.

use serde::{Deserialize, Serialize};
use shared_types::Lamports;

/// Rent parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rent {
    /// Lamports charged per stored byte for exemption.
    pub lamports_per_byte: Lamports,
    /// Bytes billed for every account on top of its data.
    pub account_overhead_bytes: usize,
}

impl Rent {
    /// Default lamports per byte (two years at 3 480 lamports per byte-year).
    pub const DEFAULT_LAMPORTS_PER_BYTE: Lamports = 6_960;

    /// Default per-account metadata overhead.
    pub const DEFAULT_ACCOUNT_OVERHEAD: usize = 128;

    /// Rent schedule that charges nothing.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            lamports_per_byte: 0,
            account_overhead_bytes: 0,
        }
    }

    /// Reserve an account with `data_len` bytes must keep.
    ///
    /// Saturates instead of overflowing; an unaffordable reserve is rejected
    /// by the payer's balance check anyway.
    #[must_use]
    pub fn minimum_balance(&self, data_len: usize) -> Lamports {
        let bytes = (self.account_overhead_bytes as u64).saturating_add(data_len as u64);
        bytes.saturating_mul(self.lamports_per_byte)
    }
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte: Self::DEFAULT_LAMPORTS_PER_BYTE,
            account_overhead_bytes: Self::DEFAULT_ACCOUNT_OVERHEAD,
        }
    }
}
