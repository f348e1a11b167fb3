//! # Program Accounts Adapter
//!
//! Typed view of a unit of work for one program: loads and stores account
//! records through the account codec, creates accounts at derived
//! addresses and performs the fund movements a transition asks for.

use crate::adapters::account_codec::{decode_account, encode_account, AccountSchema};
use crate::domain::services::FundMovement;
use crate::domain::value_objects::Address;
use crate::errors::RoundError;
use lb_01_ledger_runtime::{AccountStore, RuntimeError, UnitOfWork};
use tracing::trace;

pub struct ProgramAccounts<'u, 'l, S: AccountStore> {
    uow: &'u mut UnitOfWork<'l, S>,
    program_id: Address,
}

impl<'u, 'l, S: AccountStore> ProgramAccounts<'u, 'l, S> {
    pub fn new(uow: &'u mut UnitOfWork<'l, S>, program_id: Address) -> Self {
        Self { uow, program_id }
    }

    /// Decode the record at `address`.
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `IllegalOwner` for accounts of another program,
    /// `AccountDiscriminatorMismatch` for a record of another kind.
    pub fn load<T: AccountSchema>(&mut self, address: &Address) -> Result<T, RoundError> {
        let account = self.uow.require_account(address)?;
        if account.owner != self.program_id {
            return Err(RuntimeError::IllegalOwner {
                address: *address,
                owner: account.owner,
            }
            .into());
        }
        decode_account(&account.data)
    }

    /// Overwrite the record at `address`.
    pub fn store<T: AccountSchema>(
        &mut self,
        address: &Address,
        record: &T,
    ) -> Result<(), RoundError> {
        let data = encode_account(record)?;
        self.uow.write_data(&self.program_id, address, &data)?;
        Ok(())
    }

    /// Create the account for `record` at the address derived from `seeds`.
    /// `payer` funds the rent-exempt reserve.
    pub fn create<T: AccountSchema>(
        &mut self,
        payer: &Address,
        address: &Address,
        seeds: &[&[u8]],
        record: &T,
    ) -> Result<(), RoundError> {
        self.uow
            .create_program_account(payer, address, &self.program_id, seeds, T::SPACE)?;
        self.store(address, record)?;
        trace!(%address, kind = T::NAME, "account created");
        Ok(())
    }

    /// Move lamports between a wallet and the escrow at `pot`.
    pub fn apply_movement(
        &mut self,
        pot: &Address,
        movement: FundMovement,
    ) -> Result<(), RoundError> {
        match movement {
            FundMovement::Deposit { from, amount } => self.uow.transfer(&from, pot, amount)?,
            FundMovement::Payout { to, amount } => {
                self.uow.withdraw(&self.program_id, pot, &to, amount)?;
            }
        }
        Ok(())
    }
}
