mod balance;
mod portfolio;
mod scope;
mod valuation;

pub use scope::{NewRecord, TransactionScope};
pub use valuation::NetWorthQuery;

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::storage::Storage;

/// Entry point for ledger operations: transaction scopes, balances, and net
/// worth valuation. Holds the injected store and clock; all computations are
/// bounded sequences of read queries with no side effects, except the
/// transaction scope which is the single write path.
pub struct Ledger {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
