use serde::{Deserialize, Serialize};

use super::{AttributeMap, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
    CreditCard,
    Virtual,
}

/// A named container of ledger records, owned by one user and optionally
/// grouped into a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub user_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<Id>,
    pub account_type: AccountType,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Arbitrary data
    #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
    pub data: AttributeMap,
}

impl Account {
    pub fn new(account_type: AccountType, name: impl Into<String>, user_id: Id) -> Self {
        Self {
            id: Id::new(),
            user_id,
            portfolio_id: None,
            account_type,
            name: name.into(),
            description: String::new(),
            data: AttributeMap::new(),
        }
    }

    pub fn in_portfolio(mut self, portfolio_id: Id) -> Self {
        self.portfolio_id = Some(portfolio_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
