use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::models::{Granularity, Id};

use super::{Ledger, NetWorthQuery};

impl Ledger {
    /// Aggregate net worth of every account in the portfolio, expressed in
    /// the portfolio's target asset.
    ///
    /// Approximation is always on at this level: the aggregate view trades
    /// exact-date precision for availability across sparse price history.
    /// Configuration errors (unsupported granularity, missing portfolio)
    /// still propagate.
    pub async fn portfolio_net_worth(
        &self,
        portfolio_id: &Id,
        evaluated_at: Option<DateTime<Utc>>,
        granularity: Granularity,
    ) -> Result<Decimal> {
        let portfolio = self.storage().get_portfolio(portfolio_id).await?;
        let accounts = self.storage().accounts_in_portfolio(portfolio_id).await?;
        debug!(%portfolio_id, accounts = accounts.len(), "aggregating portfolio net worth");

        let mut net = Decimal::ZERO;
        for account in accounts {
            let query = NetWorthQuery {
                evaluated_at,
                granularity,
                approximation: true,
                target_asset_id: Some(portfolio.target_asset_id.clone()),
            };
            net += self.net_worth(&account.id, &query).await?;
        }
        Ok(net)
    }
}
