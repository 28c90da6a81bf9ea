use crate::error::{Error, Result};
use crate::models::{Account, Asset};

use super::Storage;

/// Resolve an asset by id first, then by case-insensitive name.
/// Errors if more than one asset shares the name.
pub async fn find_asset(storage: &dyn Storage, id_or_name: &str) -> Result<Option<Asset>> {
    if let Ok(asset) = storage.get_asset(&id_or_name.into()).await {
        return Ok(Some(asset));
    }

    let assets = storage.list_assets().await?;
    let mut matches: Vec<Asset> = assets
        .into_iter()
        .filter(|a| a.name.eq_ignore_ascii_case(id_or_name))
        .collect();

    if matches.len() > 1 {
        let ids: Vec<String> = matches.iter().map(|a| a.id.to_string()).collect();
        return Err(Error::validation(format!(
            "multiple assets named '{id_or_name}', use an id instead: {ids:?}"
        )));
    }

    Ok(matches.pop())
}

/// Resolve an account by id first, then by case-insensitive name.
/// Errors if more than one account shares the name.
pub async fn find_account(storage: &dyn Storage, id_or_name: &str) -> Result<Option<Account>> {
    if let Ok(account) = storage.get_account(&id_or_name.into()).await {
        return Ok(Some(account));
    }

    let accounts = storage.list_accounts().await?;
    let mut matches: Vec<Account> = accounts
        .into_iter()
        .filter(|a| a.name.eq_ignore_ascii_case(id_or_name))
        .collect();

    if matches.len() > 1 {
        let ids: Vec<String> = matches.iter().map(|a| a.id.to_string()).collect();
        return Err(Error::validation(format!(
            "multiple accounts named '{id_or_name}', use an id instead: {ids:?}"
        )));
    }

    Ok(matches.pop())
}
