use serde::{Deserialize, Serialize};

use super::Id;

/// A collection of accounts reported in a single target asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Reporting currency for aggregate net worth.
    pub target_asset_id: Id,
}

impl Portfolio {
    pub fn new(name: impl Into<String>, target_asset_id: Id) -> Self {
        Self {
            id: Id::new(),
            name: name.into(),
            description: String::new(),
            target_asset_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
