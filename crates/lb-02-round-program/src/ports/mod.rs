//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the round program.
//! These are the interfaces between the domain and the outside world.
//!
//! - **Driving Ports (Inbound)**: `RoundProgramApi`
//! - **Driven Ports (Outbound)**: `AccountStore`, `Clock` (owned by the ledger runtime)
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
