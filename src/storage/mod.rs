mod lookup;
mod memory;

pub use lookup::{find_account, find_asset};
pub use memory::MemoryStorage;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{
    Account, Asset, AssetValue, Granularity, Id, Portfolio, Record, Transaction, User,
};

/// Repository contract over the persistence collaborator.
///
/// `create_*` fails with [`Error::Validation`](crate::Error::Validation) on a
/// uniqueness violation, `get_*` with
/// [`Error::NotFound`](crate::Error::NotFound) on a lookup miss. The query
/// methods are the bounded read set the ledger calculators need; a real
/// backend is expected to answer them from indexed filters on `created_at` /
/// `evaluated_at`.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Users
    async fn create_user(&self, user: &User) -> Result<()>;
    async fn get_user(&self, id: &Id) -> Result<User>;
    async fn user_email_exists(&self, email: &str) -> Result<bool>;

    // Assets
    async fn create_asset(&self, asset: &Asset) -> Result<()>;
    async fn get_asset(&self, id: &Id) -> Result<Asset>;
    async fn list_assets(&self) -> Result<Vec<Asset>>;
    /// Deletes the asset and cascades to its asset values (as source and as
    /// target) and records. Returns false if the asset did not exist.
    async fn delete_asset(&self, id: &Id) -> Result<bool>;

    // Asset values
    async fn create_asset_value(&self, value: &AssetValue) -> Result<()>;
    async fn asset_value_exists(
        &self,
        asset_id: &Id,
        evaluated_at: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<bool>;
    /// Exact-match valuation lookup.
    async fn asset_value_at(
        &self,
        asset_id: &Id,
        target_asset_id: &Id,
        granularity: Granularity,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Option<AssetValue>>;
    /// Most recent valuation with `evaluated_at <= cutoff`.
    async fn latest_asset_value_until(
        &self,
        asset_id: &Id,
        target_asset_id: &Id,
        granularity: Granularity,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<AssetValue>>;

    // Accounts
    async fn create_account(&self, account: &Account) -> Result<()>;
    async fn get_account(&self, id: &Id) -> Result<Account>;
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    // Portfolios
    async fn create_portfolio(&self, portfolio: &Portfolio) -> Result<()>;
    async fn get_portfolio(&self, id: &Id) -> Result<Portfolio>;
    async fn accounts_in_portfolio(&self, portfolio_id: &Id) -> Result<Vec<Account>>;

    // Transactions
    async fn create_transaction(&self, transaction: &Transaction) -> Result<()>;
    async fn get_transaction(&self, id: &Id) -> Result<Transaction>;
    /// The only mutation path: state transitions driven by the ledger scope
    /// or explicit close. Records themselves are never updated.
    async fn update_transaction(&self, transaction: &Transaction) -> Result<()>;

    // Records
    async fn create_record(&self, record: &Record) -> Result<()>;
    /// All records of the account with `created_at <= cutoff`.
    async fn records_until(&self, account_id: &Id, cutoff: DateTime<Utc>) -> Result<Vec<Record>>;
    async fn records_in_transaction(&self, transaction_id: &Id) -> Result<Vec<Record>>;
}
