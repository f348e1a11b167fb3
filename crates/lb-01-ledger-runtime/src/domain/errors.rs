use shared_types::{Address, Lamports};
use thiserror::Error;

/// Failures surfaced by the runtime primitives (account creation, transfers,
/// account access). A program propagates these unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("Account already initialized: {address:?}")]
    AccountAlreadyInitialized { address: Address },

    #[error("Account not found: {address:?}")]
    AccountNotFound { address: Address },

    #[error("Address mismatch: expected {expected:?}, got {actual:?}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("Insufficient funds in {address:?}: required {required}, available {available}")]
    InsufficientFunds {
        address: Address,
        required: Lamports,
        available: Lamports,
    },

    #[error("Account {address:?} is owned by {owner:?}")]
    IllegalOwner { address: Address, owner: Address },

    #[error("Account {address:?} was not declared writable")]
    AccountNotWritable { address: Address },

    #[error("Account {address:?} was not declared by the transaction")]
    AccountNotDeclared { address: Address },

    #[error("Missing required signature for {address:?}")]
    MissingRequiredSignature { address: Address },

    #[error("Account data too small: need {required} bytes, have {available}")]
    AccountDataTooSmall { required: usize, available: usize },

    #[error("Seed constraints violated: at most {max_seeds} seeds of {max_len} bytes")]
    MaxSeedLengthExceeded { max_seeds: usize, max_len: usize },

    #[error("Lamport arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Storage error: {0}")]
    Storage(String),
}
