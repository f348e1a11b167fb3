//! # Derived Addresses
//!
//! Deterministic addresses computed from a program id and a list of seeds.
//! A program uses them to locate its accounts without a directory, and to
//! reject caller-supplied references that are not the canonical ones.
//!
//! Layout hashed with SHA-256:
//!
//! ```text
//! for each seed: len (1 byte) || seed
//! program_id (32 bytes)
//! DERIVATION_TAG
//! ```
//!
//! The length prefix keeps `["ab", "c"]` and `["a", "bc"]` apart.

use super::RuntimeError;
use sha2::{Digest, Sha256};
use shared_types::Address;

/// Maximum number of seeds per derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Domain separator appended to every derivation.
pub const DERIVATION_TAG: &[u8] = b"LastBidDerivedAddress";

/// Derive the address owned by `program_id` for `seeds`.
///
/// # Errors
///
/// `MaxSeedLengthExceeded` if there are too many seeds or one is too long.
pub fn derive_address(program_id: &Address, seeds: &[&[u8]]) -> Result<Address, RuntimeError> {
    if seeds.len() > MAX_SEEDS || seeds.iter().any(|s| s.len() > MAX_SEED_LEN) {
        return Err(RuntimeError::MaxSeedLengthExceeded {
            max_seeds: MAX_SEEDS,
            max_len: MAX_SEED_LEN,
        });
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        // MAX_SEED_LEN fits in a byte
        hasher.update([seed.len() as u8]);
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(DERIVATION_TAG);

    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Ok(Address::new(bytes))
}

/// Check that `supplied` is the canonical address for `seeds`.
///
/// # Errors
///
/// `AddressMismatch` when the caller passed any other account.
pub fn verify_derived_address(
    program_id: &Address,
    seeds: &[&[u8]],
    supplied: &Address,
) -> Result<(), RuntimeError> {
    let expected = derive_address(program_id, seeds)?;
    if expected != *supplied {
        return Err(RuntimeError::AddressMismatch {
            expected,
            actual: *supplied,
        });
    }
    Ok(())
}
