//! # Error Types
//!
//! Defines error types for parsing shared primitives.

use thiserror::Error;

/// Errors that can occur when parsing an [`Address`](crate::Address).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressParseError {
    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded input had the wrong number of bytes.
    #[error("Invalid address length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}
