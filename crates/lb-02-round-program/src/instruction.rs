//! # Instructions
//!
//! Wire format of instruction data:
//!
//! ```text
//! [0..8]   discriminator = sha256("global:<name>")[..8]
//! [8..]    bincode(arguments)
//! ```
//!
//! | Instruction | Arguments | Accounts (in order) |
//! |-------------|-----------|---------------------|
//! | `open_ledger` | - | Global Ledger (w), caller (w, signer) |
//! | `start_round` | `entry_amount: u64`, `round_duration: i64` | Global Ledger (w), Round (w), Pot (w), caller (w, signer) |
//! | `join` | `amount: u64` | Round (w), Pot (w), caller (w, signer) |
//! | `close_round` | - | Round (w), Global Ledger (w) |
//! | `claim` | - | Round (r), Pot (w), caller (w, signer) |
//!
//! The builders below derive the canonical addresses so clients cannot get
//! the account order or seeds wrong.

use crate::adapters::account_codec::discriminator;
use crate::domain::derivation::{global_ledger_address, pot_address, round_address};
use crate::domain::entities::DISCRIMINATOR_LEN;
use crate::domain::value_objects::{Address, Lamports, RoundId, RoundParams};
use crate::errors::RoundError;
use lb_01_ledger_runtime::{AccountMeta, Instruction};
use serde::{Deserialize, Serialize};

/// Decoded instruction of the round program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundInstruction {
    OpenLedger,
    StartRound(RoundParams),
    Join { amount: Lamports },
    CloseRound,
    Claim,
}

impl RoundInstruction {
    /// Snake-case name, as used in the discriminator preimage.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenLedger => "open_ledger",
            Self::StartRound(_) => "start_round",
            Self::Join { .. } => "join",
            Self::CloseRound => "close_round",
            Self::Claim => "claim",
        }
    }

    /// Minimum number of account references.
    #[must_use]
    pub fn account_count(&self) -> usize {
        match self {
            Self::OpenLedger | Self::CloseRound => 2,
            Self::Join { .. } | Self::Claim => 3,
            Self::StartRound(_) => 4,
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>, RoundError> {
        let mut data = discriminator("global", self.name()).to_vec();
        let args = match self {
            Self::StartRound(params) => {
                bincode::serialize(&(params.entry_amount, params.round_duration))
            }
            Self::Join { amount } => bincode::serialize(amount),
            Self::OpenLedger | Self::CloseRound | Self::Claim => Ok(Vec::new()),
        }
        .map_err(|e| RoundError::InvalidInstructionData(e.to_string()))?;
        data.extend_from_slice(&args);
        Ok(data)
    }

    /// Decode instruction data.
    ///
    /// # Errors
    ///
    /// `InvalidInstructionData` for short data, an unknown discriminator or
    /// undecodable arguments.
    pub fn unpack(data: &[u8]) -> Result<Self, RoundError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(RoundError::InvalidInstructionData(format!(
                "{} bytes, need at least {DISCRIMINATOR_LEN}",
                data.len()
            )));
        }
        let (tag, args) = data.split_at(DISCRIMINATOR_LEN);
        let invalid = |e: bincode::Error| RoundError::InvalidInstructionData(e.to_string());

        let matches = |name: &str| tag == discriminator("global", name);
        if matches("open_ledger") {
            Ok(Self::OpenLedger)
        } else if matches("start_round") {
            let (entry_amount, round_duration): (u64, i64) =
                bincode::deserialize(args).map_err(invalid)?;
            Ok(Self::StartRound(RoundParams::new(entry_amount, round_duration)))
        } else if matches("join") {
            let amount: u64 = bincode::deserialize(args).map_err(invalid)?;
            Ok(Self::Join { amount })
        } else if matches("close_round") {
            Ok(Self::CloseRound)
        } else if matches("claim") {
            Ok(Self::Claim)
        } else {
            Err(RoundError::InvalidInstructionData(format!(
                "unknown discriminator {}",
                hex::encode(tag)
            )))
        }
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

fn build(
    program_id: &Address,
    ix: RoundInstruction,
    accounts: Vec<AccountMeta>,
) -> Result<Instruction, RoundError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: ix.pack()?,
    })
}

pub fn open_ledger_instruction(
    program_id: &Address,
    caller: &Address,
) -> Result<Instruction, RoundError> {
    build(
        program_id,
        RoundInstruction::OpenLedger,
        vec![
            AccountMeta::new(global_ledger_address(program_id)?, false),
            AccountMeta::new(*caller, true),
        ],
    )
}

/// `round_id` must be the ledger's current `next_round_id`.
pub fn start_round_instruction(
    program_id: &Address,
    caller: &Address,
    round_id: RoundId,
    params: RoundParams,
) -> Result<Instruction, RoundError> {
    build(
        program_id,
        RoundInstruction::StartRound(params),
        vec![
            AccountMeta::new(global_ledger_address(program_id)?, false),
            AccountMeta::new(round_address(program_id, round_id)?, false),
            AccountMeta::new(pot_address(program_id, round_id)?, false),
            AccountMeta::new(*caller, true),
        ],
    )
}

pub fn join_instruction(
    program_id: &Address,
    caller: &Address,
    round_id: RoundId,
    amount: Lamports,
) -> Result<Instruction, RoundError> {
    build(
        program_id,
        RoundInstruction::Join { amount },
        vec![
            AccountMeta::new(round_address(program_id, round_id)?, false),
            AccountMeta::new(pot_address(program_id, round_id)?, false),
            AccountMeta::new(*caller, true),
        ],
    )
}

pub fn close_round_instruction(
    program_id: &Address,
    round_id: RoundId,
) -> Result<Instruction, RoundError> {
    build(
        program_id,
        RoundInstruction::CloseRound,
        vec![
            AccountMeta::new(round_address(program_id, round_id)?, false),
            AccountMeta::new(global_ledger_address(program_id)?, false),
        ],
    )
}

pub fn claim_instruction(
    program_id: &Address,
    caller: &Address,
    round_id: RoundId,
) -> Result<Instruction, RoundError> {
    build(
        program_id,
        RoundInstruction::Claim,
        vec![
            AccountMeta::new_readonly(round_address(program_id, round_id)?, false),
            AccountMeta::new(pot_address(program_id, round_id)?, false),
            AccountMeta::new(*caller, true),
        ],
    )
}
