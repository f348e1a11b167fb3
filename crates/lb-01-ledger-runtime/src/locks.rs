//! # Per-Account Lock Table
//!
//! Serializes transactions that touch the same accounts while letting
//! transactions over disjoint accounts run in parallel.
//!
//! A transaction acquires its whole access set at once, or waits. Because no
//! transaction ever holds some locks while waiting for others, there is no
//! lock-ordering deadlock.

use crate::domain::AccessSet;
use parking_lot::{Condvar, Mutex};
use tracing::trace;

/// Table of access sets currently held by in-flight units of work.
#[derive(Default)]
pub struct LockTable {
    state: Mutex<LockState>,
    released: Condvar,
}

#[derive(Default)]
struct LockState {
    next_id: u64,
    held: Vec<(u64, AccessSet)>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `access` conflicts with no held set, then hold it.
    pub fn acquire(&self, access: AccessSet) -> AccountLocks<'_> {
        let mut state = self.state.lock();
        loop {
            let conflict = state
                .held
                .iter()
                .find_map(|(_, held)| held.conflicts_with(&access));
            let Some(conflict) = conflict else {
                break;
            };
            trace!(
                address = %conflict.conflicting_address,
                kind = ?conflict.conflict_type,
                "waiting for account lock"
            );
            self.released.wait(&mut state);
        }

        let id = state.next_id;
        state.next_id = state.next_id.wrapping_add(1);
        state.held.push((id, access));
        AccountLocks { table: self, id }
    }

    /// Number of units of work currently holding locks.
    pub fn held_count(&self) -> usize {
        self.state.lock().held.len()
    }

    fn release(&self, id: u64) {
        let mut state = self.state.lock();
        state.held.retain(|(held_id, _)| *held_id != id);
        drop(state);
        self.released.notify_all();
    }
}

/// Guard for an acquired access set. Dropping it releases the locks.
pub struct AccountLocks<'t> {
    table: &'t LockTable,
    id: u64,
}

impl Drop for AccountLocks<'_> {
    fn drop(&mut self) {
        self.table.release(self.id);
    }
}
