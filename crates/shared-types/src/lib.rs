//! # Shared Types Crate
//!
//! This crate contains the primitives shared by every LastBid crate: account
//! addresses, lamport amounts, hashes and ledger timestamps.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The runtime and the round program agree on one
//!   `Address` type, so an address derived in one crate compares equal in the
//!   other.
//! - **No Placeholder Identities**: Absence of an address is expressed with
//!   `Option<Address>`, never with a reserved bit pattern.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
