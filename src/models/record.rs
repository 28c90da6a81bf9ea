use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Deposit,
    Withdraw,
    BalanceAdjustment,
}

impl RecordType {
    /// Default type from the sign of the quantity: negative moves are
    /// withdrawals, everything else a deposit.
    pub fn from_quantity(quantity: Decimal) -> Self {
        if quantity.is_sign_negative() && !quantity.is_zero() {
            RecordType::Withdraw
        } else {
            RecordType::Deposit
        }
    }
}

/// A single ledger line moving a quantity of one asset into or out of one
/// account. Records are append-only; corrections are new records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Id,
    pub account_id: Id,
    pub asset_id: Id,
    pub transaction_id: Id,
    pub record_type: RecordType,
    /// Always UTC; no offset is stored.
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity: Decimal,
}

impl Record {
    pub fn new(
        account_id: Id,
        asset_id: Id,
        transaction_id: Id,
        created_at: DateTime<Utc>,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: Id::new(),
            account_id,
            asset_id,
            transaction_id,
            record_type: RecordType::from_quantity(quantity),
            created_at,
            category: None,
            quantity,
        }
    }

    pub fn with_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
