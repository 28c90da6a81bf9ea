use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::models::{Id, Record, RecordType, Transaction, TransactionState};
use crate::storage::Storage;

use super::Ledger;

/// Fields for a record to be attached to an open transaction scope.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub account_id: Id,
    pub asset_id: Id,
    pub quantity: Decimal,
    /// Defaults to the scope clock's now.
    pub created_at: Option<DateTime<Utc>>,
    /// Defaults from the sign of `quantity`.
    pub record_type: Option<RecordType>,
    pub category: Option<String>,
}

impl NewRecord {
    pub fn new(account_id: Id, asset_id: Id, quantity: Decimal) -> Self {
        Self {
            account_id,
            asset_id,
            quantity,
            created_at: None,
            record_type: None,
            category: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An open unit-of-work. Records attached through it belong to the same
/// transaction; when the scope finishes, a still-`Initiated` transaction is
/// closed and persisted, while any other state set inside the scope is kept.
pub struct TransactionScope {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    transaction: Mutex<Transaction>,
}

impl TransactionScope {
    fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>, transaction: Transaction) -> Self {
        Self {
            storage,
            clock,
            transaction: Mutex::new(transaction),
        }
    }

    pub fn transaction_id(&self) -> Id {
        self.snapshot().id
    }

    /// Current in-scope view of the transaction entity.
    pub fn snapshot(&self) -> Transaction {
        self.transaction
            .lock()
            .expect("transaction lock poisoned")
            .clone()
    }

    /// Move the transaction to another state. A non-`Initiated` state set
    /// here survives scope exit unchanged.
    pub fn set_state(&self, state: TransactionState) {
        let mut tx = self.transaction.lock().expect("transaction lock poisoned");
        tx.state = state;
    }

    /// Create a record attached to this transaction.
    pub async fn add_record(&self, new: NewRecord) -> Result<Record> {
        let created_at = new.created_at.unwrap_or_else(|| self.clock.now());
        let mut record = Record::new(
            new.account_id,
            new.asset_id,
            self.transaction_id(),
            created_at,
            new.quantity,
        );
        if let Some(record_type) = new.record_type {
            record = record.with_type(record_type);
        }
        if let Some(category) = new.category {
            record = record.with_category(category);
        }
        self.storage.create_record(&record).await?;
        Ok(record)
    }

    /// Runs on every exit path. Closes the transaction only if it is still
    /// `Initiated`, then persists whatever state it ended up in.
    async fn finish(&self) -> Result<()> {
        let transaction = {
            let mut tx = self.transaction.lock().expect("transaction lock poisoned");
            if tx.is_initiated() {
                let closed_at = self.clock.now();
                tx.close(closed_at);
                debug!(id = %tx.id, %closed_at, "auto-closing transaction scope");
            }
            tx.clone()
        };
        self.storage.update_transaction(&transaction).await
    }
}

impl Ledger {
    /// Open a transaction in state `Initiated`, persisted immediately.
    /// `initiated_at` defaults to the clock's now.
    pub async fn begin(&self, initiated_at: Option<DateTime<Utc>>) -> Result<Transaction> {
        let initiated_at = initiated_at.unwrap_or_else(|| self.clock().now());
        let transaction = Transaction::new(initiated_at);
        self.storage().create_transaction(&transaction).await?;
        Ok(transaction)
    }

    /// Scoped acquisition of a transaction: opens one, hands the scope to
    /// `f`, and finishes the scope whether `f` succeeds or fails. Records
    /// already created inside a failed scope are not rolled back; the
    /// transaction's final state marks the outcome for reconciliation.
    pub async fn with_transaction<T, F, Fut>(
        &self,
        initiated_at: Option<DateTime<Utc>>,
        f: F,
    ) -> Result<T>
    where
        F: FnOnce(Arc<TransactionScope>) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let transaction = self.begin(initiated_at).await?;
        let scope = Arc::new(TransactionScope::new(
            self.storage().clone(),
            self.clock().clone(),
            transaction,
        ));

        let result = f(scope.clone()).await;
        let finished = scope.finish().await;

        match (result, finished) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(err), _) => Err(err),
            (Ok(_), Err(err)) => Err(err),
        }
    }
}
