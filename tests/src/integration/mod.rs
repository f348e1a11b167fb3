//! # Integration Tests
//!
//! End-to-end flows through `RoundProgramApi` against a real ledger.

pub mod concurrency;
pub mod scenarios;
pub mod substitution;
