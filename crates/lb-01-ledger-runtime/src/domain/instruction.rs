//! # Transaction Envelope
//!
//! The runtime-facing shape of a single program invocation. Signature
//! verification happens before a `Transaction` reaches the runtime; the
//! `signer` field is already authenticated.

use super::access::AccessSet;
use super::RuntimeError;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// One account reference of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account reference.
    #[must_use]
    pub fn new(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account reference.
    #[must_use]
    pub fn new_readonly(address: Address, is_signer: bool) -> Self {
        Self {
            address,
            is_signer,
            is_writable: false,
        }
    }
}

/// Program id, ordered account references and opaque instruction data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// An authenticated instruction submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identity whose signature the runtime has verified.
    pub signer: Address,
    pub instruction: Instruction,
}

impl Transaction {
    #[must_use]
    pub fn new(signer: Address, instruction: Instruction) -> Self {
        Self {
            signer,
            instruction,
        }
    }

    /// Every account flagged `is_signer` must be the authenticated signer.
    ///
    /// # Errors
    ///
    /// `MissingRequiredSignature` naming the first unsigned reference.
    pub fn verify_signers(&self) -> Result<(), RuntimeError> {
        match self
            .instruction
            .accounts
            .iter()
            .find(|meta| meta.is_signer && meta.address != self.signer)
        {
            Some(meta) => Err(RuntimeError::MissingRequiredSignature {
                address: meta.address,
            }),
            None => Ok(()),
        }
    }

    /// Accounts this transaction may read and write.
    #[must_use]
    pub fn access_set(&self) -> AccessSet {
        AccessSet::from_metas(&self.instruction.accounts)
    }
}
