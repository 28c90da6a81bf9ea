use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionState {
    Initiated,
    Closed,
    Pending,
    Invalid,
}

/// A unit-of-work envelope grouping one or more records.
///
/// Created `Initiated`; the ledger scope closes it on exit unless the caller
/// has already moved it to another state. A transaction that stays
/// `Initiated` after its scope is gone marks incomplete work for later
/// reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Id,
    pub initiated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub state: TransactionState,
}

impl Transaction {
    pub fn new(initiated_at: DateTime<Utc>) -> Self {
        Self {
            id: Id::new(),
            initiated_at,
            closed_at: None,
            state: TransactionState::Initiated,
        }
    }

    /// Explicitly close, stamping `closed_at`.
    pub fn close(&mut self, closed_at: DateTime<Utc>) {
        self.closed_at = Some(closed_at);
        self.state = TransactionState::Closed;
    }

    pub fn is_initiated(&self) -> bool {
        self.state == TransactionState::Initiated
    }
}
