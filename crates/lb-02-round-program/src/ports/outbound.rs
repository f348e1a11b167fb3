//! # Driven Ports (SPI - Outbound)
//!
//! The program reaches persisted state and time only through the ledger
//! runtime. Any `AccountStore` and `Clock` implementation can back a
//! `RoundProgramService`.

pub use lb_01_ledger_runtime::ports::{AccountStore, Clock};
