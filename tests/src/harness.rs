//! # Test Harness
//!
//! A round program service over an in-memory store, driven by a manual
//! clock so countdowns can be crossed without sleeping.

use lb_01_ledger_runtime::{InMemoryAccountStore, Ledger, ManualClock, RuntimeConfig};
use lb_02_round_program::prelude::*;
use std::sync::Arc;

pub const ENTRY: Lamports = 1_000_000;
pub const DURATION: i64 = 3_600;
pub const GENESIS: UnixTimestamp = 1_700_000_000;
pub const ADMIN_FUNDS: Lamports = 1_000_000_000;

pub type TestService = RoundProgramService<InMemoryAccountStore, Arc<ManualClock>>;

pub struct TestHarness {
    pub service: TestService,
    pub clock: Arc<ManualClock>,
    pub admin: Address,
}

impl TestHarness {
    /// Harness configured from the `LB_*` environment variables.
    pub fn new() -> Self {
        Self::with_configs(RuntimeConfig::from_env(), ServiceConfig::from_env())
    }

    pub fn with_config(config: ServiceConfig) -> Self {
        Self::with_configs(RuntimeConfig::from_env(), config)
    }

    /// Harness whose ledger bills no storage rent.
    pub fn rent_free() -> Self {
        Self::with_configs(RuntimeConfig::rent_free(), ServiceConfig::from_env())
    }

    pub fn with_configs(runtime: RuntimeConfig, config: ServiceConfig) -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS));
        let ledger = Ledger::new(InMemoryAccountStore::new(), &runtime);
        let service = RoundProgramService::new(ledger, Arc::clone(&clock), config);
        let admin = Address::new_unique();
        service
            .ledger()
            .fund(&admin, ADMIN_FUNDS)
            .expect("fund admin");
        Self {
            service,
            clock,
            admin,
        }
    }

    /// Harness with the global ledger already opened by `admin`.
    pub fn opened() -> Self {
        let harness = Self::new();
        harness
            .service
            .open_ledger(&harness.admin)
            .expect("open ledger");
        harness
    }

    /// Open the ledger and start one round with the default parameters.
    pub fn with_round() -> (Self, RoundId) {
        let harness = Self::opened();
        let round_id = harness.start_round();
        (harness, round_id)
    }

    pub fn start_round(&self) -> RoundId {
        let receipt = self
            .service
            .start_round(&self.admin, ENTRY, DURATION)
            .expect("start round");
        receipt
            .events
            .iter()
            .find_map(RoundEvent::round_id)
            .expect("round started event")
    }

    /// A fresh wallet holding `lamports`.
    pub fn wallet(&self, lamports: Lamports) -> Address {
        let address = Address::new_unique();
        self.service
            .ledger()
            .fund(&address, lamports)
            .expect("fund wallet");
        address
    }

    /// A fresh wallet able to join `joins` times.
    pub fn player(&self, joins: u64) -> Address {
        self.wallet(ENTRY * joins)
    }

    pub fn store(&self) -> &InMemoryAccountStore {
        self.service.ledger().store()
    }

    pub fn lamports(&self, address: &Address) -> Lamports {
        self.store().lamports(address)
    }

    /// Move the clock past the round's current deadline.
    pub fn expire(&self, round_id: RoundId) {
        let round = self
            .service
            .round(round_id)
            .expect("read round")
            .expect("round exists");
        self.clock.set(round.deadline());
    }

    pub fn round(&self, round_id: RoundId) -> Round {
        self.service
            .round(round_id)
            .expect("read round")
            .expect("round exists")
    }

    pub fn pot(&self, round_id: RoundId) -> Pot {
        self.service
            .pot(round_id)
            .expect("read pot")
            .expect("pot exists")
    }

    pub fn global(&self) -> GlobalLedger {
        self.service
            .global_ledger()
            .expect("read global ledger")
            .expect("global ledger exists")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
