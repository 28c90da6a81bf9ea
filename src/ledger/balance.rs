use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::Id;

use super::Ledger;

impl Ledger {
    /// Per-asset net quantities of an account as of `evaluated_at`
    /// (defaults to now).
    ///
    /// Sums the quantity of every record with `created_at <= evaluated_at`,
    /// grouped by asset. Assets whose records net to zero stay in the map;
    /// an account with no records yields an empty map.
    pub async fn balance(
        &self,
        account_id: &Id,
        evaluated_at: Option<DateTime<Utc>>,
    ) -> Result<HashMap<Id, Decimal>> {
        let evaluated_at = evaluated_at.unwrap_or_else(|| self.clock().now());
        let records = self.storage().records_until(account_id, evaluated_at).await?;

        let mut balances: HashMap<Id, Decimal> = HashMap::new();
        for record in records {
            *balances.entry(record.asset_id).or_insert(Decimal::ZERO) += record.quantity;
        }
        Ok(balances)
    }
}
