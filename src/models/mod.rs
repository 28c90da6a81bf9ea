mod account;
mod asset;
mod asset_value;
mod id;
mod portfolio;
mod record;
mod transaction;
mod user;

pub use account::{Account, AccountType};
pub use asset::{Asset, AssetType};
pub use asset_value::{AssetValue, Granularity};
pub use id::Id;
pub use portfolio::Portfolio;
pub use record::{Record, RecordType};
pub use transaction::{Transaction, TransactionState};
pub use user::User;

/// Free-form attribute map carried by users, assets, and accounts.
/// String keys, JSON-compatible values.
pub type AttributeMap = serde_json::Map<String, serde_json::Value>;
