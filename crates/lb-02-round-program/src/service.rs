//! # Round Program Service
//!
//! Executes round program transactions against the ledger runtime.
//!
//! ## Execution Flow
//!
//! ```text
//! Transaction ─→ program id + instruction decode
//!             ─→ Ledger::begin (signatures, account locks)
//!             ─→ canonical addresses, signer, account decode
//!             ─→ pure handler (domain::services)
//!             ─→ invariant check on the new states
//!             ─→ stage fund movement + account writes
//!             ─→ commit (one batch) ─→ Receipt
//! ```
//!
//! Any failure drops the unit of work: no account changes and no lamports
//! move.

use crate::adapters::account_codec::{decode_account, AccountSchema};
use crate::adapters::program_accounts::ProgramAccounts;
use crate::config::ServiceConfig;
use crate::domain::derivation::{
    global_ledger_address, global_ledger_seeds, pot_address, require_canonical, round_address,
};
use crate::domain::entities::{GlobalLedger, Pot, Round, RoundStatus};
use crate::domain::invariants::{check_all_invariants, InvariantContext};
use crate::domain::services;
use crate::domain::value_objects::{
    round_id_seed, Address, Lamports, RoundId, RoundParams, UnixTimestamp, POT_SEED, ROUND_SEED,
};
use crate::errors::RoundError;
use crate::events::{Receipt, RoundEvent};
use crate::instruction::{
    claim_instruction, close_round_instruction, join_instruction, open_ledger_instruction,
    start_round_instruction, RoundInstruction,
};
use crate::ports::inbound::RoundProgramApi;
use crate::ports::outbound::{AccountStore, Clock};

use lb_01_ledger_runtime::{
    Account, AccountMeta, Instruction, Ledger, RuntimeError, Transaction, UnitOfWork,
};
use parking_lot::RwLock;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Statistics for the Round Program Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Total transactions processed.
    pub transactions_processed: u64,
    /// Transactions committed.
    pub committed: u64,
    /// Transactions rejected (any error).
    pub rejected: u64,
    /// Rounds started.
    pub rounds_started: u64,
    /// Rounds closed.
    pub rounds_closed: u64,
    /// Lamports deposited by joins.
    pub lamports_deposited: u64,
    /// Lamports paid out by claims.
    pub lamports_paid_out: u64,
    /// Average execution time in microseconds.
    pub avg_execution_time_us: u64,
}

/// The main Round Program Service.
///
/// This service:
/// 1. Decodes and validates incoming transactions
/// 2. Runs the pure round handlers on the decoded account states
/// 3. Commits the resulting states and fund movements atomically
/// 4. Maintains execution statistics
pub struct RoundProgramService<S: AccountStore, C: Clock> {
    config: ServiceConfig,
    ledger: Ledger<S>,
    clock: C,
    stats: RwLock<ServiceStats>,
}

/// What a committed transaction did, for receipts and statistics.
struct Executed {
    now: UnixTimestamp,
    events: Vec<RoundEvent>,
}

impl<S: AccountStore, C: Clock> RoundProgramService<S, C> {
    /// Create a new Round Program Service.
    pub fn new(ledger: Ledger<S>, clock: C, config: ServiceConfig) -> Self {
        info!(program_id = %config.program_id, "Round program service initialized");
        Self {
            config,
            ledger,
            clock,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn program_id(&self) -> Address {
        self.config.program_id
    }

    /// The underlying ledger, for funding wallets and inspecting balances.
    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    #[instrument(name = "round_program", skip(self, tx), fields(signer = %tx.signer))]
    fn execute(&self, tx: &Transaction, invocation_id: Uuid) -> Result<Receipt, RoundError> {
        let start = Instant::now();
        #[cfg(feature = "metrics")]
        let _timer = lb_telemetry::metrics::HistogramTimer::new(
            &lb_telemetry::metrics::OPERATION_DURATION,
        );

        let instruction = self.decode(tx);
        let name = instruction
            .as_ref()
            .map_or("unknown", RoundInstruction::name);
        let result = instruction.and_then(|ix| self.apply(tx, ix));

        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.record(name, &result, elapsed_us);

        match result {
            Ok(executed) => {
                info!(
                    instruction = name,
                    events = executed.events.len(),
                    executed_at = executed.now,
                    "Transaction committed"
                );
                Ok(Receipt {
                    invocation_id,
                    instruction: name.to_string(),
                    executed_at: executed.now,
                    events: executed.events,
                })
            }
            Err(error) => {
                warn!(
                    instruction = name,
                    kind = error.kind(),
                    code = ?error.code(),
                    %error,
                    "Transaction rejected"
                );
                Err(error)
            }
        }
    }

    fn decode(&self, tx: &Transaction) -> Result<RoundInstruction, RoundError> {
        if tx.instruction.program_id != self.config.program_id {
            return Err(RoundError::IncorrectProgramId);
        }
        RoundInstruction::unpack(&tx.instruction.data)
    }

    fn apply(&self, tx: &Transaction, ix: RoundInstruction) -> Result<Executed, RoundError> {
        let accounts = &tx.instruction.accounts;
        if accounts.len() < ix.account_count() {
            return Err(RoundError::NotEnoughAccountKeys {
                expected: ix.account_count(),
                actual: accounts.len(),
            });
        }

        let mut uow = self.ledger.begin(tx)?;
        // Sampled once, after the locks are held
        let now = self.clock.unix_timestamp();
        debug!(instruction = ix.name(), now, "Executing");

        let events = match ix {
            RoundInstruction::OpenLedger => self.open_ledger_ix(&mut uow, accounts)?,
            RoundInstruction::StartRound(params) => {
                self.start_round_ix(&mut uow, accounts, params, now)?
            }
            RoundInstruction::Join { amount } => self.join_ix(&mut uow, accounts, amount, now)?,
            RoundInstruction::CloseRound => self.close_round_ix(&mut uow, accounts, now)?,
            RoundInstruction::Claim => self.claim_ix(&mut uow, accounts)?,
        };

        uow.commit()?;
        Ok(Executed { now, events })
    }

    fn open_ledger_ix(
        &self,
        uow: &mut UnitOfWork<'_, S>,
        accounts: &[AccountMeta],
    ) -> Result<Vec<RoundEvent>, RoundError> {
        let program_id = self.config.program_id;
        let global = accounts[0].address;
        require_canonical(global_ledger_address(&program_id)?, &global)?;
        let caller = require_signer(uow.signer(), &accounts[1])?;

        let ledger = services::open_ledger(caller);
        ProgramAccounts::new(uow, program_id).create(
            &caller,
            &global,
            &global_ledger_seeds(),
            &ledger,
        )?;

        Ok(vec![RoundEvent::LedgerOpened { authority: caller }])
    }

    fn start_round_ix(
        &self,
        uow: &mut UnitOfWork<'_, S>,
        accounts: &[AccountMeta],
        params: RoundParams,
        now: UnixTimestamp,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        let program_id = self.config.program_id;
        let (global, round_key, pot_key) =
            (accounts[0].address, accounts[1].address, accounts[2].address);
        require_canonical(global_ledger_address(&program_id)?, &global)?;
        let caller = require_signer(uow.signer(), &accounts[3])?;

        let mut program = ProgramAccounts::new(uow, program_id);
        let ledger: GlobalLedger = program.load(&global)?;
        let t = services::start_round(&ledger, &caller, params, now)?;
        self.verify_invariants(InvariantContext {
            ledger: Some(&t.ledger),
            round: Some(&t.round),
            pot: Some(&t.pot),
        })?;

        // The creation primitive rejects Round/Pot references that are not
        // derived from the new round id
        let id_seed = round_id_seed(t.round.round_id);
        program.create(&caller, &round_key, &[ROUND_SEED, &id_seed], &t.round)?;
        program.create(&caller, &pot_key, &[POT_SEED, &id_seed], &t.pot)?;
        program.store(&global, &t.ledger)?;

        Ok(vec![RoundEvent::RoundStarted {
            round_id: t.round.round_id,
            entry_amount: t.pot.entry_amount,
            round_duration: t.round.round_duration,
            started_at: t.round.started_at,
        }])
    }

    fn join_ix(
        &self,
        uow: &mut UnitOfWork<'_, S>,
        accounts: &[AccountMeta],
        amount: Lamports,
        now: UnixTimestamp,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        let program_id = self.config.program_id;
        let (round_key, pot_key) = (accounts[0].address, accounts[1].address);
        let caller = require_signer(uow.signer(), &accounts[2])?;

        let mut program = ProgramAccounts::new(uow, program_id);
        let (round, pot) = load_round_and_pot(&mut program, &program_id, &round_key, &pot_key)?;
        let t = services::join(&round, &pot, &caller, amount, now)?;
        self.verify_invariants(InvariantContext {
            ledger: None,
            round: Some(&t.round),
            pot: Some(&t.pot),
        })?;

        program.apply_movement(&pot_key, t.movement)?;
        program.store(&round_key, &t.round)?;
        program.store(&pot_key, &t.pot)?;

        Ok(vec![RoundEvent::Joined {
            round_id: t.round.round_id,
            leader: caller,
            amount,
            join_count: t.round.join_count,
            pot_balance: t.pot.balance,
            deadline: t.round.deadline(),
        }])
    }

    fn close_round_ix(
        &self,
        uow: &mut UnitOfWork<'_, S>,
        accounts: &[AccountMeta],
        now: UnixTimestamp,
    ) -> Result<Vec<RoundEvent>, RoundError> {
        let program_id = self.config.program_id;
        let (round_key, global) = (accounts[0].address, accounts[1].address);
        require_canonical(global_ledger_address(&program_id)?, &global)?;
        let closed_by = uow.signer();

        let mut program = ProgramAccounts::new(uow, program_id);
        let round: Round = program.load(&round_key)?;
        require_canonical(round_address(&program_id, round.round_id)?, &round_key)?;
        let ledger: GlobalLedger = program.load(&global)?;

        let t = services::close_round(&ledger, &round, now)?;
        self.verify_invariants(InvariantContext {
            ledger: Some(&t.ledger),
            round: Some(&t.round),
            pot: None,
        })?;

        program.store(&round_key, &t.round)?;
        program.store(&global, &t.ledger)?;

        Ok(vec![RoundEvent::RoundClosed {
            round_id: t.round.round_id,
            winner: t.round.leader,
            join_count: t.round.join_count,
            closed_by,
        }])
    }

    fn claim_ix(
        &self,
        uow: &mut UnitOfWork<'_, S>,
        accounts: &[AccountMeta],
    ) -> Result<Vec<RoundEvent>, RoundError> {
        let program_id = self.config.program_id;
        let (round_key, pot_key) = (accounts[0].address, accounts[1].address);
        let caller = require_signer(uow.signer(), &accounts[2])?;

        let mut program = ProgramAccounts::new(uow, program_id);
        let (round, pot) = load_round_and_pot(&mut program, &program_id, &round_key, &pot_key)?;
        let t = services::claim(&round, &pot, &caller)?;
        self.verify_invariants(InvariantContext {
            ledger: None,
            round: Some(&round),
            pot: Some(&t.pot),
        })?;

        program.apply_movement(&pot_key, t.movement)?;
        program.store(&pot_key, &t.pot)?;

        Ok(vec![RoundEvent::PotClaimed {
            round_id: round.round_id,
            winner: caller,
            amount: pot.balance,
        }])
    }

    fn verify_invariants(&self, ctx: InvariantContext<'_>) -> Result<(), RoundError> {
        if !self.config.check_invariants {
            return Ok(());
        }
        let result = check_all_invariants(&ctx);
        if result.is_ok() {
            Ok(())
        } else {
            Err(RoundError::InvariantViolated(result.to_string()))
        }
    }

    // =========================================================================
    // STATISTICS
    // =========================================================================

    #[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
    fn record(&self, name: &str, result: &Result<Executed, RoundError>, elapsed_us: u64) {
        let mut stats = self.stats.write();
        stats.transactions_processed += 1;
        let total = u128::from(stats.transactions_processed);
        let sum = u128::from(stats.avg_execution_time_us) * (total - 1) + u128::from(elapsed_us);
        stats.avg_execution_time_us = u64::try_from(sum / total).unwrap_or(u64::MAX);

        let Ok(executed) = result else {
            stats.rejected += 1;
            #[cfg(feature = "metrics")]
            lb_telemetry::metrics::record_operation(name, "rejected");
            return;
        };

        stats.committed += 1;
        #[cfg(feature = "metrics")]
        lb_telemetry::metrics::record_operation(name, "committed");

        for event in &executed.events {
            match event {
                RoundEvent::RoundStarted { .. } => stats.rounds_started += 1,
                RoundEvent::RoundClosed { .. } => {
                    stats.rounds_closed += 1;
                    #[cfg(feature = "metrics")]
                    lb_telemetry::metrics::record_round_closed();
                }
                RoundEvent::Joined { amount, .. } => {
                    stats.lamports_deposited = stats.lamports_deposited.saturating_add(*amount);
                    #[cfg(feature = "metrics")]
                    lb_telemetry::metrics::record_deposit(*amount);
                }
                RoundEvent::PotClaimed { amount, .. } => {
                    stats.lamports_paid_out = stats.lamports_paid_out.saturating_add(*amount);
                    #[cfg(feature = "metrics")]
                    lb_telemetry::metrics::record_payout(*amount);
                }
                RoundEvent::LedgerOpened { .. } => {}
            }
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    fn read<T: AccountSchema>(&self, address: &Address) -> Result<Option<T>, RoundError> {
        let account = self.ledger.account(address)?;
        self.decode_record(address, account)
    }

    fn decode_record<T: AccountSchema>(
        &self,
        address: &Address,
        account: Option<Account>,
    ) -> Result<Option<T>, RoundError> {
        match account {
            None => Ok(None),
            // Pre-funded address the program has not initialized yet
            Some(account) if account.is_wallet() && account.data.is_empty() => Ok(None),
            Some(account) if account.owner != self.config.program_id => {
                Err(RuntimeError::IllegalOwner {
                    address: *address,
                    owner: account.owner,
                }
                .into())
            }
            Some(account) => decode_account(&account.data).map(Some),
        }
    }

    fn submit(&self, caller: &Address, instruction: Instruction) -> Result<Receipt, RoundError> {
        self.process_transaction(&Transaction::new(*caller, instruction))
    }
}

/// The caller reference must be the authenticated signer.
fn require_signer(signer: Address, meta: &AccountMeta) -> Result<Address, RoundError> {
    if !meta.is_signer || meta.address != signer {
        return Err(RuntimeError::MissingRequiredSignature {
            address: meta.address,
        }
        .into());
    }
    Ok(meta.address)
}

/// Load a Round and its Pot, rejecting references that are not the
/// canonical accounts of the round's id.
fn load_round_and_pot<S: AccountStore>(
    program: &mut ProgramAccounts<'_, '_, S>,
    program_id: &Address,
    round_key: &Address,
    pot_key: &Address,
) -> Result<(Round, Pot), RoundError> {
    let round: Round = program.load(round_key)?;
    require_canonical(round_address(program_id, round.round_id)?, round_key)?;
    require_canonical(pot_address(program_id, round.round_id)?, pot_key)?;
    let pot: Pot = program.load(pot_key)?;
    Ok((round, pot))
}

// =============================================================================
// API IMPLEMENTATION
// =============================================================================

impl<S: AccountStore, C: Clock> RoundProgramApi for RoundProgramService<S, C> {
    fn process_transaction(&self, tx: &Transaction) -> Result<Receipt, RoundError> {
        self.execute(tx, Uuid::new_v4())
    }

    fn open_ledger(&self, caller: &Address) -> Result<Receipt, RoundError> {
        self.submit(caller, open_ledger_instruction(&self.config.program_id, caller)?)
    }

    fn start_round(
        &self,
        caller: &Address,
        entry_amount: Lamports,
        round_duration: i64,
    ) -> Result<Receipt, RoundError> {
        let round_id = self.global_ledger()?.map_or(0, |ledger| ledger.next_round_id);
        let ix = start_round_instruction(
            &self.config.program_id,
            caller,
            round_id,
            RoundParams::new(entry_amount, round_duration),
        )?;
        self.submit(caller, ix)
    }

    fn join(
        &self,
        caller: &Address,
        round_id: RoundId,
        amount: Lamports,
    ) -> Result<Receipt, RoundError> {
        let ix = join_instruction(&self.config.program_id, caller, round_id, amount)?;
        self.submit(caller, ix)
    }

    fn close_round(&self, caller: &Address, round_id: RoundId) -> Result<Receipt, RoundError> {
        self.submit(caller, close_round_instruction(&self.config.program_id, round_id)?)
    }

    fn claim(&self, caller: &Address, round_id: RoundId) -> Result<Receipt, RoundError> {
        self.submit(caller, claim_instruction(&self.config.program_id, caller, round_id)?)
    }

    fn global_ledger(&self) -> Result<Option<GlobalLedger>, RoundError> {
        self.read(&global_ledger_address(&self.config.program_id)?)
    }

    fn round(&self, round_id: RoundId) -> Result<Option<Round>, RoundError> {
        self.read(&round_address(&self.config.program_id, round_id)?)
    }

    fn pot(&self, round_id: RoundId) -> Result<Option<Pot>, RoundError> {
        self.read(&pot_address(&self.config.program_id, round_id)?)
    }

    fn round_status(&self, round_id: RoundId) -> Result<Option<RoundStatus>, RoundError> {
        let program_id = self.config.program_id;
        let round_key = round_address(&program_id, round_id)?;
        let pot_key = pot_address(&program_id, round_id)?;
        // One locked read so join_count and pot_balance come from the same commit
        let mut accounts = self.ledger.accounts(&[round_key, pot_key])?.into_iter();
        let round: Option<Round> = self.decode_record(&round_key, accounts.next().flatten())?;
        let pot: Option<Pot> = self.decode_record(&pot_key, accounts.next().flatten())?;
        let (Some(round), Some(pot)) = (round, pot) else {
            return Ok(None);
        };
        Ok(Some(RoundStatus::new(
            &round,
            &pot,
            self.clock.unix_timestamp(),
        )))
    }
}
