//! # Error Types
//!
//! All error types for the round program.
//!
//! Program errors carry a stable numeric code starting at 6000 so clients
//! can match on them without parsing messages. Runtime failures (missing
//! funds, substituted accounts, double initialization) are wrapped
//! unchanged in [`RoundError::Runtime`].

use lb_01_ledger_runtime::RuntimeError;
use thiserror::Error;

/// First code of the program's error range.
pub const ERROR_CODE_OFFSET: u32 = 6000;

/// Errors returned by round program operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    // =========================================================================
    // AUTHORIZATION
    // =========================================================================
    /// Caller is not the ledger authority.
    #[error("Unauthorized: only the ledger authority can start a round")]
    Unauthorized,

    /// Caller is not the leader of the round.
    #[error("Only the round leader can claim the pot")]
    NotLeader,

    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    #[error("A round is already active")]
    RoundAlreadyActive,

    #[error("Round is not active")]
    RoundNotActive,

    #[error("Round has not ended")]
    RoundNotEnded,

    // =========================================================================
    // VALUE
    // =========================================================================
    #[error("Incorrect deposit amount: expected {expected}, got {actual}")]
    IncorrectDepositAmount { expected: u64, actual: u64 },

    #[error("Caller is already the leader")]
    AlreadyLeader,

    #[error("Pot is empty")]
    NothingToClaim,

    #[error("Entry amount must be greater than zero")]
    InvalidEntryAmount,

    #[error("Round duration must be greater than zero, got {0}")]
    InvalidRoundDuration(i64),

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Post-transition consistency check failed. The transaction is
    /// discarded.
    #[error("Invariant violated: {0}")]
    InvariantViolated(String),

    // =========================================================================
    // ENVELOPE
    // =========================================================================
    #[error("Not enough account keys: expected {expected}, got {actual}")]
    NotEnoughAccountKeys { expected: usize, actual: usize },

    #[error("Incorrect program id")]
    IncorrectProgramId,

    #[error("Invalid instruction data: {0}")]
    InvalidInstructionData(String),

    #[error("Account discriminator mismatch: expected {expected}")]
    AccountDiscriminatorMismatch { expected: &'static str },

    #[error("Failed to deserialize {account}: {reason}")]
    AccountDidNotDeserialize {
        account: &'static str,
        reason: String,
    },

    #[error("Failed to serialize {account}: {reason}")]
    AccountDidNotSerialize {
        account: &'static str,
        reason: String,
    },

    // =========================================================================
    // RUNTIME
    // =========================================================================
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl RoundError {
    /// Stable numeric code. Runtime failures have no program code.
    #[must_use]
    pub fn code(&self) -> Option<u32> {
        let index = match self {
            Self::Unauthorized => 0,
            Self::NotLeader => 1,
            Self::RoundAlreadyActive => 2,
            Self::RoundNotActive => 3,
            Self::RoundNotEnded => 4,
            Self::IncorrectDepositAmount { .. } => 5,
            Self::AlreadyLeader => 6,
            Self::NothingToClaim => 7,
            Self::InvalidEntryAmount => 8,
            Self::InvalidRoundDuration(_) => 9,
            Self::ArithmeticOverflow => 10,
            Self::InvariantViolated(_) => 11,
            Self::NotEnoughAccountKeys { .. } => 12,
            Self::IncorrectProgramId => 13,
            Self::InvalidInstructionData(_) => 14,
            Self::AccountDiscriminatorMismatch { .. } => 15,
            Self::AccountDidNotDeserialize { .. } => 16,
            Self::AccountDidNotSerialize { .. } => 17,
            Self::Runtime(_) => return None,
        };
        Some(ERROR_CODE_OFFSET + index)
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotLeader => "not_leader",
            Self::RoundAlreadyActive => "round_already_active",
            Self::RoundNotActive => "round_not_active",
            Self::RoundNotEnded => "round_not_ended",
            Self::IncorrectDepositAmount { .. } => "incorrect_deposit_amount",
            Self::AlreadyLeader => "already_leader",
            Self::NothingToClaim => "nothing_to_claim",
            Self::InvalidEntryAmount => "invalid_entry_amount",
            Self::InvalidRoundDuration(_) => "invalid_round_duration",
            Self::ArithmeticOverflow => "arithmetic_overflow",
            Self::InvariantViolated(_) => "invariant_violated",
            Self::NotEnoughAccountKeys { .. } => "not_enough_account_keys",
            Self::IncorrectProgramId => "incorrect_program_id",
            Self::InvalidInstructionData(_) => "invalid_instruction_data",
            Self::AccountDiscriminatorMismatch { .. } => "account_discriminator_mismatch",
            Self::AccountDidNotDeserialize { .. } => "account_did_not_deserialize",
            Self::AccountDidNotSerialize { .. } => "account_did_not_serialize",
            Self::Runtime(RuntimeError::InsufficientFunds { .. }) => "insufficient_funds",
            Self::Runtime(RuntimeError::AddressMismatch { .. }) => "address_mismatch",
            Self::Runtime(_) => "runtime",
        }
    }
}

/// Result alias for program operations.
pub type RoundResult<T> = Result<T, RoundError>;
