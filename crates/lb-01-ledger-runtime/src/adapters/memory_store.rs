use crate::domain::{Account, RuntimeError};
use crate::ports::AccountStore;
use parking_lot::RwLock;
use shared_types::{Address, Lamports};
use std::collections::HashMap;

/// In-memory implementation of `AccountStore`.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Address, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Sum of lamports over every stored account.
    pub fn total_lamports(&self) -> u128 {
        self.accounts
            .read()
            .values()
            .map(|account| u128::from(account.lamports))
            .sum()
    }

    /// Copy of every stored account, for snapshots and assertions.
    pub fn snapshot(&self) -> HashMap<Address, Account> {
        self.accounts.read().clone()
    }

    /// Lamports held by `address`, zero if absent.
    pub fn lamports(&self, address: &Address) -> Lamports {
        self.accounts
            .read()
            .get(address)
            .map_or(0, |account| account.lamports)
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, RuntimeError> {
        Ok(self.accounts.read().get(address).cloned())
    }

    fn commit(&self, batch: Vec<(Address, Account)>) -> Result<(), RuntimeError> {
        let mut accounts = self.accounts.write();
        for (address, account) in batch {
            accounts.insert(address, account);
        }
        Ok(())
    }
}
