//! # Account Codec
//!
//! Binary layout of program accounts:
//!
//! ```text
//! [0..8]   discriminator = sha256("account:<Name>")[..8]
//! [8..]    bincode(record), zero-padded to the account's SPACE
//! ```
//!
//! The discriminator keeps one account kind from being decoded as another,
//! so a Pot can never be passed where a Round is expected.

use crate::domain::entities::{GlobalLedger, Pot, Round, DISCRIMINATOR_LEN};
use crate::errors::RoundError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A record stored in a program account.
pub trait AccountSchema: Serialize + DeserializeOwned {
    /// Type name used in the discriminator preimage.
    const NAME: &'static str;
    /// Fixed account size in bytes, discriminator included.
    const SPACE: usize;

    fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        discriminator("account", Self::NAME)
    }
}

impl AccountSchema for GlobalLedger {
    const NAME: &'static str = "GlobalLedger";
    const SPACE: usize = GlobalLedger::SPACE;
}

impl AccountSchema for Round {
    const NAME: &'static str = "Round";
    const SPACE: usize = Round::SPACE;
}

impl AccountSchema for Pot {
    const NAME: &'static str = "Pot";
    const SPACE: usize = Pot::SPACE;
}

/// `sha256("<namespace>:<name>")[..8]`.
#[must_use]
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Encode `record` with its discriminator, padded to `T::SPACE`.
pub fn encode_account<T: AccountSchema>(record: &T) -> Result<Vec<u8>, RoundError> {
    let body = bincode::serialize(record).map_err(|e| RoundError::AccountDidNotSerialize {
        account: T::NAME,
        reason: e.to_string(),
    })?;
    let len = DISCRIMINATOR_LEN + body.len();
    if len > T::SPACE {
        return Err(RoundError::AccountDidNotSerialize {
            account: T::NAME,
            reason: format!("{len} bytes exceed space {}", T::SPACE),
        });
    }

    let mut data = Vec::with_capacity(T::SPACE);
    data.extend_from_slice(&T::discriminator());
    data.extend_from_slice(&body);
    data.resize(T::SPACE, 0);
    Ok(data)
}

/// Decode account data written by [`encode_account`]. Trailing padding is
/// ignored.
pub fn decode_account<T: AccountSchema>(data: &[u8]) -> Result<T, RoundError> {
    if data.len() < DISCRIMINATOR_LEN || data[..DISCRIMINATOR_LEN] != T::discriminator() {
        return Err(RoundError::AccountDiscriminatorMismatch { expected: T::NAME });
    }
    bincode::deserialize(&data[DISCRIMINATOR_LEN..]).map_err(|e| {
        RoundError::AccountDidNotDeserialize {
            account: T::NAME,
            reason: e.to_string(),
        }
    })
}
