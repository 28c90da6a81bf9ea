use serde::{Deserialize, Serialize};

use super::{AttributeMap, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Currency,
    Stock,
    Bond,
    Security,
    Fund,
    Commodity,
}

/// A holdable unit: a currency, a security, a commodity, etc.
/// Identity is immutable once created; records and asset values refer to it
/// by id and are cascade-deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Id,
    pub asset_type: AssetType,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Arbitrary data
    #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
    pub data: AttributeMap,
}

impl Asset {
    pub fn new(asset_type: AssetType, name: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            asset_type,
            name: name.into(),
            description: String::new(),
            data: AttributeMap::new(),
        }
    }

    pub fn currency(name: impl Into<String>) -> Self {
        Self::new(AssetType::Currency, name)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_data(mut self, data: AttributeMap) -> Self {
        self.data = data;
        self
    }
}
