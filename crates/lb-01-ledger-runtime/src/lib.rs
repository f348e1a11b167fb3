//! # lb-01-ledger-runtime
//!
//! Account ledger the round program runs on.
//!
//! ## Role in System
//!
//! - **Account Model**: Wallets and program-owned accounts holding lamports
//!   and fixed-size data
//! - **Derived Addresses**: Deterministic addresses from program id + seeds
//! - **Storage Billing**: Rent-exempt reserve proportional to account size
//! - **Atomicity**: Every transaction stages its mutations in a
//!   [`UnitOfWork`] and commits them as one batch, or not at all
//! - **Isolation**: A per-account [`LockTable`] serializes transactions that
//!   share a writable account
//!
//! ## Transaction Flow
//!
//! ```text
//! Transaction ──→ verify_signers ──→ acquire locks ──→ UnitOfWork
//!                                                        │
//!                      create / write / transfer / withdraw (staged)
//!                                                        │
//!                                commit ──→ AccountStore (one batch)
//!                                drop   ──→ discarded
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod locks;
pub mod ports;
pub mod unit_of_work;

pub use adapters::*;
pub use config::RuntimeConfig;
pub use domain::*;
pub use ledger::Ledger;
pub use locks::{AccountLocks, LockTable};
pub use ports::*;
pub use unit_of_work::UnitOfWork;
