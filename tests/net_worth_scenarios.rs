use std::sync::Arc;

use assetbook::clock::FixedClock;
use assetbook::ledger::{Ledger, NetWorthQuery, NewRecord};
use assetbook::models::{Account, AccountType, Asset, AssetType, AssetValue, Granularity, Id, User};
use assetbook::storage::{MemoryStorage, Storage};
use assetbook::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

struct Fixture {
    ledger: Ledger,
    krw: Asset,
    sp500: Asset,
    account_checking: Account,
    account_sp500: Account,
}

/// One user holding 1000 units of S&P 500 bought on 2016-02-25, with daily
/// KRW closes seeded for 2016-02-22 through 2016-02-25.
async fn fixture() -> Result<Fixture> {
    let storage = Arc::new(MemoryStorage::new());
    let ledger = Ledger::new(storage.clone())
        .with_clock(Arc::new(FixedClock::new(date(2016, 3, 10))));

    let user = User::new("Sumin", "Byeon", "sumin@example.com");
    storage.create_user(&user).await?;

    let krw = Asset::currency("KRW").with_description("Korean Won");
    let sp500 = Asset::new(AssetType::Security, "S&P 500");
    storage.create_asset(&krw).await?;
    storage.create_asset(&sp500).await?;

    let account_checking =
        Account::new(AccountType::Checking, "Shinhan Checking", user.id.clone());
    let account_sp500 = Account::new(AccountType::Investment, "S&P500 Fund", user.id.clone());
    storage.create_account(&account_checking).await?;
    storage.create_account(&account_sp500).await?;

    for (day, close) in [(22, dec!(921.76)), (23, dec!(921.06)), (24, dec!(932.00)), (25, dec!(921.77))] {
        storage
            .create_asset_value(&AssetValue::new(
                sp500.id.clone(),
                krw.id.clone(),
                date(2016, 2, day),
                Granularity::Day,
                close,
            ))
            .await?;
    }

    let checking = account_checking.id.clone();
    let fund = account_sp500.id.clone();
    let (krw_id, sp500_id) = (krw.id.clone(), sp500.id.clone());
    ledger
        .with_transaction(Some(date(2016, 2, 25)), |scope| async move {
            scope
                .add_record(
                    NewRecord::new(fund, sp500_id, dec!(1000)).created_at(date(2016, 2, 25)),
                )
                .await?;
            scope
                .add_record(
                    NewRecord::new(checking, krw_id, dec!(-921770))
                        .created_at(date(2016, 2, 25)),
                )
                .await?;
            Ok(())
        })
        .await?;

    Ok(Fixture {
        ledger,
        krw,
        sp500,
        account_checking,
        account_sp500,
    })
}

#[tokio::test]
async fn exact_lookup_prices_holdings_at_the_cutoff_date() -> Result<()> {
    let fx = fixture().await?;
    let query = NetWorthQuery::in_asset(fx.krw.id.clone()).at(date(2016, 2, 25));
    let net = fx.ledger.net_worth(&fx.account_sp500.id, &query).await?;
    assert_eq!(net, dec!(921770.00));
    Ok(())
}

#[tokio::test]
async fn cutoff_time_of_day_is_discarded_for_daily_valuation() -> Result<()> {
    let fx = fixture().await?;
    let afternoon = Utc.with_ymd_and_hms(2016, 2, 25, 15, 45, 0).unwrap();
    let query = NetWorthQuery::in_asset(fx.krw.id.clone()).at(afternoon);
    let net = fx.ledger.net_worth(&fx.account_sp500.id, &query).await?;
    assert_eq!(net, dec!(921770.00));
    Ok(())
}

#[tokio::test]
async fn approximation_falls_back_to_most_recent_prior_close() -> Result<()> {
    let fx = fixture().await?;
    // No valuation exists for 2016-03-01; the 2016-02-25 close applies.
    let query = NetWorthQuery::in_asset(fx.krw.id.clone())
        .at(date(2016, 3, 1))
        .approximate();
    let net = fx.ledger.net_worth(&fx.account_sp500.id, &query).await?;
    assert_eq!(net, dec!(921770.00));
    Ok(())
}

#[tokio::test]
async fn approximation_picks_the_maximum_prior_date_not_the_first() -> Result<()> {
    let fx = fixture().await?;
    // 2016-02-24 has a distinct close (932.00); a cutoff on that date must
    // use it rather than any earlier observation.
    let query = NetWorthQuery::in_asset(fx.krw.id.clone())
        .at(date(2016, 2, 24))
        .approximate();
    let net = fx.ledger.net_worth(&fx.account_sp500.id, &query).await?;
    assert_eq!(net, dec!(932000.00));
    Ok(())
}

#[tokio::test]
async fn exact_lookup_miss_is_fatal() -> Result<()> {
    let fx = fixture().await?;
    let query = NetWorthQuery::in_asset(fx.krw.id.clone()).at(date(2016, 3, 1));
    let err = fx
        .ledger
        .net_worth(&fx.account_sp500.id, &query)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AssetValueUnavailable { .. }));
    Ok(())
}

#[tokio::test]
async fn target_asset_holdings_convert_by_identity() -> Result<()> {
    let fx = fixture().await?;
    // The checking account only holds KRW; no price lookup happens.
    let query = NetWorthQuery::in_asset(fx.krw.id.clone()).at(date(2016, 2, 25));
    let net = fx.ledger.net_worth(&fx.account_checking.id, &query).await?;
    assert_eq!(net, dec!(-921770));
    Ok(())
}

#[tokio::test]
async fn missing_target_asset_is_rejected_before_anything_else() -> Result<()> {
    let fx = fixture().await?;
    let query = NetWorthQuery {
        evaluated_at: Some(date(2016, 2, 25)),
        ..NetWorthQuery::default()
    };
    let err = fx
        .ledger
        .net_worth(&fx.account_sp500.id, &query)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidTargetAsset));
    Ok(())
}

#[tokio::test]
async fn non_daily_granularity_is_unsupported() -> Result<()> {
    let fx = fixture().await?;
    let query = NetWorthQuery::in_asset(fx.krw.id.clone())
        .at(date(2016, 2, 25))
        .granularity(Granularity::Hour);
    let err = fx
        .ledger
        .net_worth(&fx.account_sp500.id, &query)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedGranularity(Granularity::Hour)
    ));
    Ok(())
}

#[tokio::test]
async fn approximation_with_no_history_contributes_zero() -> Result<()> {
    let fx = fixture().await?;
    // Cutoff before any seeded valuation: the S&P holding is worth nothing
    // rather than failing the computation.
    let storage = fx.ledger.storage();
    let early = date(2016, 2, 20);
    storage
        .create_record(&assetbook::models::Record::new(
            fx.account_sp500.id.clone(),
            fx.sp500.id.clone(),
            Id::from("tx-early"),
            early,
            dec!(500),
        ))
        .await?;

    let query = NetWorthQuery::in_asset(fx.krw.id.clone())
        .at(date(2016, 2, 21))
        .approximate();
    let net = fx.ledger.net_worth(&fx.account_sp500.id, &query).await?;
    assert_eq!(net, dec!(0));
    Ok(())
}
