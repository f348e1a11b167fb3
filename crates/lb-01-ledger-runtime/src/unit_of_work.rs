//! # Unit of Work
//!
//! Staging area for one transaction. Reads load committed accounts into a
//! private working set; every mutation (account creation, data writes,
//! lamport movements) is applied to that working set only. `commit` hands
//! the dirty accounts to the store as one batch. Dropping the unit of work
//! without committing discards everything, so a failed precondition can
//! never leave a transfer without its matching state change.
//!
//! The unit of work holds the transaction's account locks for its whole
//! lifetime.

use crate::domain::{verify_derived_address, AccessSet, Account, Rent, RuntimeError};
use crate::locks::AccountLocks;
use crate::ports::AccountStore;
use shared_types::{Address, Lamports};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

pub struct UnitOfWork<'l, S: AccountStore> {
    store: &'l S,
    rent: Rent,
    signer: Address,
    access: AccessSet,
    working: HashMap<Address, Option<Account>>,
    dirty: BTreeSet<Address>,
    _locks: AccountLocks<'l>,
}

impl<'l, S: AccountStore> UnitOfWork<'l, S> {
    pub(crate) fn new(
        store: &'l S,
        rent: Rent,
        signer: Address,
        access: AccessSet,
        locks: AccountLocks<'l>,
    ) -> Self {
        Self {
            store,
            rent,
            signer,
            access,
            working: HashMap::new(),
            dirty: BTreeSet::new(),
            _locks: locks,
        }
    }

    /// The authenticated transaction signer.
    pub fn signer(&self) -> Address {
        self.signer
    }

    pub fn rent(&self) -> Rent {
        self.rent
    }

    // =========================================================================
    // READS
    // =========================================================================

    fn slot(&mut self, address: &Address) -> Result<&mut Option<Account>, RuntimeError> {
        if !self.access.is_declared(address) {
            return Err(RuntimeError::AccountNotDeclared { address: *address });
        }
        if !self.working.contains_key(address) {
            let loaded = self.store.get_account(address)?;
            self.working.insert(*address, loaded);
        }
        self.working
            .get_mut(address)
            .ok_or(RuntimeError::AccountNotFound { address: *address })
    }

    fn slot_mut(&mut self, address: &Address) -> Result<&mut Option<Account>, RuntimeError> {
        if !self.access.is_writable(address) {
            return Err(RuntimeError::AccountNotWritable { address: *address });
        }
        self.dirty.insert(*address);
        self.slot(address)
    }

    /// Staged view of an account, `None` if it does not exist.
    pub fn account(&mut self, address: &Address) -> Result<Option<&Account>, RuntimeError> {
        Ok(self.slot(address)?.as_ref())
    }

    /// Staged view of an account that must exist.
    pub fn require_account(&mut self, address: &Address) -> Result<&Account, RuntimeError> {
        self.slot(address)?
            .as_ref()
            .ok_or(RuntimeError::AccountNotFound { address: *address })
    }

    /// Staged lamports of an account, zero if it does not exist.
    pub fn lamports(&mut self, address: &Address) -> Result<Lamports, RuntimeError> {
        Ok(self.account(address)?.map_or(0, |account| account.lamports))
    }

    // =========================================================================
    // ACCOUNT CREATION
    // =========================================================================

    /// Create a program-owned account at the address derived from `seeds`.
    ///
    /// The payer must be the signer and funds the rent-exempt reserve. A
    /// data-less wallet already sitting at the address (someone pre-funded
    /// it) is adopted and only topped up; any initialized account is
    /// rejected.
    ///
    /// # Errors
    ///
    /// `AddressMismatch`, `AccountAlreadyInitialized`, `InsufficientFunds`,
    /// `MissingRequiredSignature`, `AccountNotWritable`.
    pub fn create_program_account(
        &mut self,
        payer: &Address,
        address: &Address,
        program_id: &Address,
        seeds: &[&[u8]],
        space: usize,
    ) -> Result<(), RuntimeError> {
        verify_derived_address(program_id, seeds, address)?;
        if *payer != self.signer {
            return Err(RuntimeError::MissingRequiredSignature { address: *payer });
        }

        let existing = match self.slot_mut(address)? {
            None => 0,
            Some(account) if account.is_wallet() && account.data.is_empty() => account.lamports,
            Some(_) => return Err(RuntimeError::AccountAlreadyInitialized { address: *address }),
        };

        let reserve = self.rent.minimum_balance(space);
        let top_up = reserve.saturating_sub(existing);
        self.debit_wallet(payer, top_up)?;

        let lamports = existing
            .checked_add(top_up)
            .ok_or(RuntimeError::ArithmeticOverflow)?;
        *self.slot_mut(address)? = Some(Account::program_owned(*program_id, lamports, space));

        debug!(%address, owner = %program_id, space, reserve, "program account created");
        Ok(())
    }

    // =========================================================================
    // DATA
    // =========================================================================

    /// Overwrite the data of an account owned by `program_id`.
    ///
    /// The account's size is fixed; shorter payloads are zero-padded.
    pub fn write_data(
        &mut self,
        program_id: &Address,
        address: &Address,
        data: &[u8],
    ) -> Result<(), RuntimeError> {
        let account = self
            .slot_mut(address)?
            .as_mut()
            .ok_or(RuntimeError::AccountNotFound { address: *address })?;

        if account.owner != *program_id {
            return Err(RuntimeError::IllegalOwner {
                address: *address,
                owner: account.owner,
            });
        }
        if data.len() > account.data.len() {
            return Err(RuntimeError::AccountDataTooSmall {
                required: data.len(),
                available: account.data.len(),
            });
        }

        account.data[..data.len()].copy_from_slice(data);
        account.data[data.len()..].fill(0);
        Ok(())
    }

    // =========================================================================
    // LAMPORT MOVEMENTS
    // =========================================================================

    /// Move lamports out of the signer's wallet.
    ///
    /// # Errors
    ///
    /// `MissingRequiredSignature` unless `from` is the signer,
    /// `InsufficientFunds` if the wallet cannot cover `amount`.
    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Lamports,
    ) -> Result<(), RuntimeError> {
        if *from != self.signer {
            return Err(RuntimeError::MissingRequiredSignature { address: *from });
        }
        // Destination writability is checked before any debit is staged
        self.slot_mut(to)?;
        self.debit_wallet(from, amount)?;
        self.credit(to, amount)?;
        debug!(%from, %to, amount, "transfer staged");
        Ok(())
    }

    /// Move lamports out of an account owned by `program_id`.
    ///
    /// The account must keep its rent-exempt reserve.
    pub fn withdraw(
        &mut self,
        program_id: &Address,
        from: &Address,
        to: &Address,
        amount: Lamports,
    ) -> Result<(), RuntimeError> {
        self.slot_mut(to)?;
        let rent = self.rent;
        let account = self
            .slot_mut(from)?
            .as_mut()
            .ok_or(RuntimeError::AccountNotFound { address: *from })?;

        if account.owner != *program_id {
            return Err(RuntimeError::IllegalOwner {
                address: *from,
                owner: account.owner,
            });
        }

        let reserve = rent.minimum_balance(account.data.len());
        let spendable = account.lamports.saturating_sub(reserve);
        if spendable < amount {
            return Err(RuntimeError::InsufficientFunds {
                address: *from,
                required: amount,
                available: spendable,
            });
        }
        account.lamports -= amount;

        self.credit(to, amount)?;
        debug!(%from, %to, amount, "withdrawal staged");
        Ok(())
    }

    fn debit_wallet(&mut self, address: &Address, amount: Lamports) -> Result<(), RuntimeError> {
        if amount == 0 {
            return Ok(());
        }
        match self.slot_mut(address)? {
            None => Err(RuntimeError::InsufficientFunds {
                address: *address,
                required: amount,
                available: 0,
            }),
            Some(account) if !account.is_wallet() => Err(RuntimeError::IllegalOwner {
                address: *address,
                owner: account.owner,
            }),
            Some(account) if account.lamports < amount => Err(RuntimeError::InsufficientFunds {
                address: *address,
                required: amount,
                available: account.lamports,
            }),
            Some(account) => {
                account.lamports -= amount;
                Ok(())
            }
        }
    }

    fn credit(&mut self, address: &Address, amount: Lamports) -> Result<(), RuntimeError> {
        let slot = self.slot_mut(address)?;
        if let Some(account) = slot.as_mut() {
            account.lamports = account
                .lamports
                .checked_add(amount)
                .ok_or(RuntimeError::ArithmeticOverflow)?;
        } else {
            *slot = Some(Account::wallet(amount));
        }
        Ok(())
    }

    // =========================================================================
    // COMMIT
    // =========================================================================

    /// Persist every staged mutation as one batch. Returns the number of
    /// accounts written.
    pub fn commit(mut self) -> Result<usize, RuntimeError> {
        let batch: Vec<(Address, Account)> = self
            .dirty
            .iter()
            .filter_map(|address| {
                self.working
                    .remove(address)
                    .flatten()
                    .map(|account| (*address, account))
            })
            .collect();
        let written = batch.len();
        self.store.commit(batch)?;
        debug!(written, "unit of work committed");
        Ok(written)
    }
}
