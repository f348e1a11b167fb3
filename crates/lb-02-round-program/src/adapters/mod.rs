//! # Adapters Layer (Outer Hexagon)
//!
//! - `account_codec`: discriminator + bincode layout of account records
//! - `program_accounts`: typed account access on top of a unit of work

pub mod account_codec;
pub mod program_accounts;

pub use account_codec::*;
pub use program_accounts::*;
