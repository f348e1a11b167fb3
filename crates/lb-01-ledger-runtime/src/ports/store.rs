use crate::domain::{Account, RuntimeError};
use shared_types::Address;

/// Committed account storage.
///
/// `commit` must apply the whole batch or nothing: a reader never observes
/// half of a unit of work.
pub trait AccountStore: Send + Sync {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, RuntimeError>;
    fn commit(&self, batch: Vec<(Address, Account)>) -> Result<(), RuntimeError>;
}
