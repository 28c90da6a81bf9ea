use serde::{Deserialize, Serialize};

use super::{AttributeMap, Id};

/// An identity that owns accounts. Email is unique across users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    /// Arbitrary data
    #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
    pub data: AttributeMap,
}

impl User {
    pub fn new(
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Id::new(),
            given_name: given_name.into(),
            family_name: family_name.into(),
            email: email.into(),
            data: AttributeMap::new(),
        }
    }

    pub fn with_data(mut self, data: AttributeMap) -> Self {
        self.data = data;
        self
    }

    /// "family, given" rendering.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.given_name)
    }
}
