use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Id;

/// Time bucket size of a valuation observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1sec")]
    Sec,
    #[serde(rename = "1min")]
    Min,
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "1hour")]
    Hour,
    #[default]
    #[serde(rename = "1day")]
    Day,
    #[serde(rename = "1week")]
    Week,
    #[serde(rename = "1month")]
    Month,
    #[serde(rename = "1year")]
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Sec => "1sec",
            Granularity::Min => "1min",
            Granularity::FiveMin => "5min",
            Granularity::Hour => "1hour",
            Granularity::Day => "1day",
            Granularity::Week => "1week",
            Granularity::Month => "1month",
            Granularity::Year => "1year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced observation of one asset expressed in a target asset.
///
/// Produced by market-data ingestion or manual seeding, never mutated after
/// creation. Unique on (asset_id, evaluated_at, granularity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetValue {
    pub id: Id,
    pub asset_id: Id,
    pub target_asset_id: Id,
    pub evaluated_at: DateTime<Utc>,
    pub granularity: Granularity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
    pub close: Decimal,
}

impl AssetValue {
    pub fn new(
        asset_id: Id,
        target_asset_id: Id,
        evaluated_at: DateTime<Utc>,
        granularity: Granularity,
        close: Decimal,
    ) -> Self {
        Self {
            id: Id::new(),
            asset_id,
            target_asset_id,
            evaluated_at,
            granularity,
            open: None,
            high: None,
            low: None,
            close,
        }
    }

    pub fn with_ohlc(mut self, open: Decimal, high: Decimal, low: Decimal) -> Self {
        self.open = Some(open);
        self.high = Some(high);
        self.low = Some(low);
        self
    }
}
