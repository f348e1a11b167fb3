//! # Ledger
//!
//! Entry point of the runtime: owns the account store, the rent schedule and
//! the lock table, and hands out units of work for authenticated
//! transactions.

use crate::config::RuntimeConfig;
use crate::domain::{AccessSet, Account, Rent, RuntimeError, Transaction};
use crate::locks::LockTable;
use crate::ports::AccountStore;
use crate::unit_of_work::UnitOfWork;
use shared_types::{Address, Lamports};
use tracing::{debug, info};

pub struct Ledger<S: AccountStore> {
    store: S,
    rent: Rent,
    locks: LockTable,
}

impl<S: AccountStore> Ledger<S> {
    pub fn new(store: S, config: &RuntimeConfig) -> Self {
        info!(
            lamports_per_byte = config.rent.lamports_per_byte,
            overhead = config.rent.account_overhead_bytes,
            "ledger runtime initialized"
        );
        Self {
            store,
            rent: config.rent,
            locks: LockTable::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rent(&self) -> Rent {
        self.rent
    }

    /// Open a unit of work for `tx`.
    ///
    /// Signatures are checked first, then the transaction's declared
    /// accounts are locked. The call blocks while another unit of work
    /// holds a conflicting lock.
    ///
    /// # Errors
    ///
    /// `MissingRequiredSignature` if a signer-flagged account is not the
    /// authenticated signer.
    pub fn begin(&self, tx: &Transaction) -> Result<UnitOfWork<'_, S>, RuntimeError> {
        tx.verify_signers()?;
        let access = tx.access_set();
        let locks = self.locks.acquire(access.clone());
        debug!(signer = %tx.signer, "unit of work opened");
        Ok(UnitOfWork::new(&self.store, self.rent, tx.signer, access, locks))
    }

    /// Committed state of an account.
    pub fn account(&self, address: &Address) -> Result<Option<Account>, RuntimeError> {
        self.store.get_account(address)
    }

    /// Committed state of several accounts as of one instant.
    ///
    /// Takes read locks on all of them, so no unit of work commits to any
    /// of them between the reads.
    pub fn accounts(&self, addresses: &[Address]) -> Result<Vec<Option<Account>>, RuntimeError> {
        let access = addresses
            .iter()
            .fold(AccessSet::new(), |access, address| access.with_readonly(*address));
        let _locks = self.locks.acquire(access);
        addresses
            .iter()
            .map(|address| self.store.get_account(address))
            .collect()
    }

    /// Committed lamports of an account, zero if absent.
    pub fn lamports(&self, address: &Address) -> Result<Lamports, RuntimeError> {
        Ok(self
            .store
            .get_account(address)?
            .map_or(0, |account| account.lamports))
    }

    /// Mint lamports into `address` outside of any transaction.
    ///
    /// Creates a wallet if the address is empty. Used to seed balances for
    /// simulations and tests.
    pub fn fund(&self, address: &Address, lamports: Lamports) -> Result<(), RuntimeError> {
        let _locks = self
            .locks
            .acquire(AccessSet::new().with_writable(*address));
        let account = match self.store.get_account(address)? {
            Some(mut account) => {
                account.lamports = account
                    .lamports
                    .checked_add(lamports)
                    .ok_or(RuntimeError::ArithmeticOverflow)?;
                account
            }
            None => Account::wallet(lamports),
        };
        self.store.commit(vec![(*address, account)])?;
        debug!(%address, lamports, "account funded");
        Ok(())
    }
}
