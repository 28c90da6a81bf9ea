use chrono::{DateTime, Utc};

use crate::models::{Granularity, Id};

/// Errors surfaced by the ledger and storage layers.
///
/// None of these are retried internally: they indicate either a caller
/// mistake (missing target asset, unsupported granularity), a constraint
/// violation, or a genuine data gap only the caller can resolve.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A uniqueness or integrity constraint was violated on create.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Lookup by identifier found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Net worth was requested without a target asset.
    #[error("target asset cannot be null")]
    InvalidTargetAsset,

    /// Only daily granularity is supported for valuation.
    #[error("unsupported granularity: {0}")]
    UnsupportedGranularity(Granularity),

    /// No asset value exists at exactly the requested date
    /// (non-approximate lookup).
    #[error("no value for asset {asset_id} in {target_asset_id} at {evaluated_at}")]
    AssetValueUnavailable {
        asset_id: Id,
        target_asset_id: Id,
        evaluated_at: DateTime<Utc>,
    },

    /// The underlying store failed.
    #[error("storage error")]
    Storage(#[from] anyhow::Error),
}

impl Error {
    pub fn not_found(entity: &'static str, id: &Id) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
