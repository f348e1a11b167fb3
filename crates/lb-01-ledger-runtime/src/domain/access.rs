use super::instruction::AccountMeta;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;

/// Accounts a transaction declares it will read or write.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSet {
    writable: BTreeSet<Address>,
    readonly: BTreeSet<Address>,
}

impl AccessSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from instruction account references. An address listed both
    /// read-only and writable is writable.
    pub fn from_metas(metas: &[AccountMeta]) -> Self {
        let mut set = Self::new();
        for meta in metas {
            if meta.is_writable {
                set.add_writable(meta.address);
            } else {
                set.add_readonly(meta.address);
            }
        }
        set
    }

    pub fn with_writable(mut self, address: Address) -> Self {
        self.add_writable(address);
        self
    }

    pub fn with_readonly(mut self, address: Address) -> Self {
        self.add_readonly(address);
        self
    }

    pub fn add_writable(&mut self, address: Address) {
        self.readonly.remove(&address);
        self.writable.insert(address);
    }

    pub fn add_readonly(&mut self, address: Address) {
        if !self.writable.contains(&address) {
            self.readonly.insert(address);
        }
    }

    pub fn is_writable(&self, address: &Address) -> bool {
        self.writable.contains(address)
    }

    pub fn is_declared(&self, address: &Address) -> bool {
        self.writable.contains(address) || self.readonly.contains(address)
    }

    pub fn writable(&self) -> impl Iterator<Item = &Address> {
        self.writable.iter()
    }

    /// First conflict between two access sets, if any.
    ///
    /// Two writers of one account, or a writer and a reader, conflict.
    /// Readers never conflict with each other.
    pub fn conflicts_with(&self, other: &AccessSet) -> Option<ConflictInfo> {
        if let Some(address) = self.writable.intersection(&other.writable).next() {
            return Some(ConflictInfo {
                conflict_type: ConflictType::WriteWrite,
                conflicting_address: *address,
            });
        }

        self.writable
            .intersection(&other.readonly)
            .chain(self.readonly.intersection(&other.writable))
            .next()
            .map(|address| ConflictInfo {
                conflict_type: ConflictType::ReadWrite,
                conflicting_address: *address,
            })
    }
}

/// Conflict type between transactions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictType {
    ReadWrite,
    WriteWrite,
}

/// Conflict information
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub conflict_type: ConflictType,
    pub conflicting_address: Address,
}
