use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Granularity, Id};

use super::Ledger;

/// Parameters of a net worth computation.
#[derive(Debug, Clone, Default)]
pub struct NetWorthQuery {
    /// Cutoff; defaults to now.
    pub evaluated_at: Option<DateTime<Utc>>,
    /// Only [`Granularity::Day`] is supported for valuation.
    pub granularity: Granularity,
    /// When true, a missing exact-date price falls back to the most recent
    /// prior one, and a missing price altogether contributes zero.
    pub approximation: bool,
    /// Reporting asset. Required despite being optional in shape.
    pub target_asset_id: Option<Id>,
}

impl NetWorthQuery {
    pub fn in_asset(target_asset_id: Id) -> Self {
        Self {
            target_asset_id: Some(target_asset_id),
            ..Self::default()
        }
    }

    pub fn at(mut self, evaluated_at: DateTime<Utc>) -> Self {
        self.evaluated_at = Some(evaluated_at);
        self
    }

    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn approximate(mut self) -> Self {
        self.approximation = true;
        self
    }
}

/// Truncate to the calendar date at midnight UTC. Daily valuation discards
/// time-of-day on both the balance cutoff and the price lookup.
fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

impl Ledger {
    /// Net worth of an account in the query's target asset as of the cutoff.
    ///
    /// Holdings of the target asset itself convert by identity; every other
    /// held asset is priced through its stored daily close. Without
    /// approximation, a missing exact-date price fails with
    /// [`Error::AssetValueUnavailable`]; with it, the most recent prior price
    /// is used, or zero when none exists at all.
    pub async fn net_worth(&self, account_id: &Id, query: &NetWorthQuery) -> Result<Decimal> {
        let target_asset_id = query
            .target_asset_id
            .as_ref()
            .ok_or(Error::InvalidTargetAsset)?;

        let evaluated_at = query.evaluated_at.unwrap_or_else(|| self.clock().now());
        let evaluated_at = match query.granularity {
            Granularity::Day => start_of_day(evaluated_at),
            other => return Err(Error::UnsupportedGranularity(other)),
        };

        let mut net = Decimal::ZERO;
        for (asset_id, quantity) in self.balance(account_id, Some(evaluated_at)).await? {
            if &asset_id == target_asset_id {
                net += quantity;
                continue;
            }

            let asset_value = if query.approximation {
                self.storage()
                    .latest_asset_value_until(
                        &asset_id,
                        target_asset_id,
                        query.granularity,
                        evaluated_at,
                    )
                    .await?
            } else {
                self.storage()
                    .asset_value_at(&asset_id, target_asset_id, query.granularity, evaluated_at)
                    .await?
            };

            match asset_value {
                Some(value) => net += value.close * quantity,
                None if query.approximation => {
                    // Lenient fallback for sparse history: the holding
                    // contributes nothing rather than failing the whole sum.
                    debug!(%asset_id, %evaluated_at, "no prior valuation, contributing zero");
                }
                None => {
                    return Err(Error::AssetValueUnavailable {
                        asset_id,
                        target_asset_id: target_asset_id.clone(),
                        evaluated_at,
                    })
                }
            }
        }

        Ok(net)
    }
}
