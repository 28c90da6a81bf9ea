//! In-memory storage implementation. The reference backend for tests and
//! embedding; a relational store behind the same trait is expected in
//! production deployments.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{
    Account, Asset, AssetValue, Granularity, Id, Portfolio, Record, Transaction, User,
};

use super::Storage;

#[derive(Default)]
pub struct MemoryStorage {
    users: Mutex<HashMap<Id, User>>,
    assets: Mutex<HashMap<Id, Asset>>,
    asset_values: Mutex<HashMap<Id, AssetValue>>,
    accounts: Mutex<HashMap<Id, Account>>,
    portfolios: Mutex<HashMap<Id, Portfolio>>,
    transactions: Mutex<HashMap<Id, Transaction>>,
    records: Mutex<HashMap<Id, Record>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_new<T: Clone>(map: &mut HashMap<Id, T>, id: &Id, value: &T, entity: &str) -> Result<()> {
    if map.contains_key(id) {
        return Err(Error::validation(format!("duplicate {entity} id: {id}")));
    }
    map.insert(id.clone(), value.clone());
    Ok(())
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.lock().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(Error::validation(format!(
                "email already registered: {}",
                user.email
            )));
        }
        insert_new(&mut users, &user.id, user, "user")
    }

    async fn get_user(&self, id: &Id) -> Result<User> {
        let users = self.users.lock().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("user", id))
    }

    async fn user_email_exists(&self, email: &str) -> Result<bool> {
        let users = self.users.lock().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn create_asset(&self, asset: &Asset) -> Result<()> {
        let mut assets = self.assets.lock().await;
        insert_new(&mut assets, &asset.id, asset, "asset")
    }

    async fn get_asset(&self, id: &Id) -> Result<Asset> {
        let assets = self.assets.lock().await;
        assets
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("asset", id))
    }

    async fn list_assets(&self) -> Result<Vec<Asset>> {
        let assets = self.assets.lock().await;
        Ok(assets.values().cloned().collect())
    }

    async fn delete_asset(&self, id: &Id) -> Result<bool> {
        let mut assets = self.assets.lock().await;
        if assets.remove(id).is_none() {
            return Ok(false);
        }
        let mut values = self.asset_values.lock().await;
        values.retain(|_, v| &v.asset_id != id && &v.target_asset_id != id);
        let mut records = self.records.lock().await;
        records.retain(|_, r| &r.asset_id != id);
        Ok(true)
    }

    async fn create_asset_value(&self, value: &AssetValue) -> Result<()> {
        let mut values = self.asset_values.lock().await;
        let clash = values.values().any(|v| {
            v.asset_id == value.asset_id
                && v.evaluated_at == value.evaluated_at
                && v.granularity == value.granularity
        });
        if clash {
            return Err(Error::validation(format!(
                "asset value already exists for asset {} at {} ({})",
                value.asset_id, value.evaluated_at, value.granularity
            )));
        }
        insert_new(&mut values, &value.id, value, "asset value")
    }

    async fn asset_value_exists(
        &self,
        asset_id: &Id,
        evaluated_at: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<bool> {
        let values = self.asset_values.lock().await;
        Ok(values.values().any(|v| {
            &v.asset_id == asset_id
                && v.evaluated_at == evaluated_at
                && v.granularity == granularity
        }))
    }

    async fn asset_value_at(
        &self,
        asset_id: &Id,
        target_asset_id: &Id,
        granularity: Granularity,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Option<AssetValue>> {
        let values = self.asset_values.lock().await;
        Ok(values
            .values()
            .find(|v| {
                &v.asset_id == asset_id
                    && &v.target_asset_id == target_asset_id
                    && v.granularity == granularity
                    && v.evaluated_at == evaluated_at
            })
            .cloned())
    }

    async fn latest_asset_value_until(
        &self,
        asset_id: &Id,
        target_asset_id: &Id,
        granularity: Granularity,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<AssetValue>> {
        let values = self.asset_values.lock().await;
        Ok(values
            .values()
            .filter(|v| {
                &v.asset_id == asset_id
                    && &v.target_asset_id == target_asset_id
                    && v.granularity == granularity
                    && v.evaluated_at <= cutoff
            })
            .max_by_key(|v| v.evaluated_at)
            .cloned())
    }

    async fn create_account(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.lock().await;
        insert_new(&mut accounts, &account.id, account, "account")
    }

    async fn get_account(&self, id: &Id) -> Result<Account> {
        let accounts = self.accounts.lock().await;
        accounts
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("account", id))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.values().cloned().collect())
    }

    async fn create_portfolio(&self, portfolio: &Portfolio) -> Result<()> {
        let mut portfolios = self.portfolios.lock().await;
        insert_new(&mut portfolios, &portfolio.id, portfolio, "portfolio")
    }

    async fn get_portfolio(&self, id: &Id) -> Result<Portfolio> {
        let portfolios = self.portfolios.lock().await;
        portfolios
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("portfolio", id))
    }

    async fn accounts_in_portfolio(&self, portfolio_id: &Id) -> Result<Vec<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .values()
            .filter(|a| a.portfolio_id.as_ref() == Some(portfolio_id))
            .cloned()
            .collect())
    }

    async fn create_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.transactions.lock().await;
        insert_new(&mut transactions, &transaction.id, transaction, "transaction")
    }

    async fn get_transaction(&self, id: &Id) -> Result<Transaction> {
        let transactions = self.transactions.lock().await;
        transactions
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("transaction", id))
    }

    async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.transactions.lock().await;
        match transactions.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(())
            }
            None => Err(Error::not_found("transaction", &transaction.id)),
        }
    }

    async fn create_record(&self, record: &Record) -> Result<()> {
        let mut records = self.records.lock().await;
        insert_new(&mut records, &record.id, record, "record")
    }

    async fn records_until(&self, account_id: &Id, cutoff: DateTime<Utc>) -> Result<Vec<Record>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|r| &r.account_id == account_id && r.created_at <= cutoff)
            .cloned()
            .collect())
    }

    async fn records_in_transaction(&self, transaction_id: &Id) -> Result<Vec<Record>> {
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|r| &r.transaction_id == transaction_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetType;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn duplicate_email_is_rejected() -> Result<()> {
        let storage = MemoryStorage::new();
        storage
            .create_user(&User::new("Jane", "Doe", "jane@example.com"))
            .await?;

        let err = storage
            .create_user(&User::new("Janet", "Doe", "jane@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(storage.user_email_exists("jane@example.com").await?);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_valuation_key_is_rejected() -> Result<()> {
        let storage = MemoryStorage::new();
        let date = Utc.with_ymd_and_hms(2016, 2, 25, 0, 0, 0).unwrap();
        let first = AssetValue::new(
            Id::from("asset-sp500"),
            Id::from("asset-krw"),
            date,
            Granularity::Day,
            dec!(921.77),
        );
        storage.create_asset_value(&first).await?;

        // Same (asset, evaluated_at, granularity), different target and id.
        let second = AssetValue::new(
            Id::from("asset-sp500"),
            Id::from("asset-usd"),
            date,
            Granularity::Day,
            dec!(0.79),
        );
        let err = storage.create_asset_value(&second).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_asset_cascades_values_and_records() -> Result<()> {
        let storage = MemoryStorage::new();
        let gold = Asset::new(AssetType::Commodity, "Gold");
        let krw = Asset::currency("KRW");
        storage.create_asset(&gold).await?;
        storage.create_asset(&krw).await?;

        let date = Utc.with_ymd_and_hms(2016, 2, 25, 0, 0, 0).unwrap();
        storage
            .create_asset_value(&AssetValue::new(
                gold.id.clone(),
                krw.id.clone(),
                date,
                Granularity::Day,
                dec!(48603),
            ))
            .await?;
        storage
            .create_record(&Record::new(
                Id::from("acct-1"),
                gold.id.clone(),
                Id::from("tx-1"),
                date,
                dec!(2.00),
            ))
            .await?;

        assert!(storage.delete_asset(&gold.id).await?);
        assert!(storage.get_asset(&gold.id).await.is_err());
        assert!(storage
            .latest_asset_value_until(&gold.id, &krw.id, Granularity::Day, date)
            .await?
            .is_none());
        assert!(storage.records_until(&Id::from("acct-1"), date).await?.is_empty());
        Ok(())
    }
}
