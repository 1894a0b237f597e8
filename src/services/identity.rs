use crate::{
    error::{AppError, AppResult},
    models::AccountId,
    services::providers::GameDataProvider,
};

/// Turns a numeric account id or a vanity name into a canonical account id
///
/// Input that parses as an unsigned 64-bit integer is already canonical and is
/// returned unchanged without a request. Anything else is sent to the provider's
/// vanity lookup; every failure of that lookup is reported as a resolution error.
pub async fn resolve_account(
    provider: &dyn GameDataProvider,
    id_or_vanity: &str,
) -> AppResult<AccountId> {
    if id_or_vanity.parse::<u64>().is_ok() {
        return Ok(AccountId::from(id_or_vanity));
    }

    tracing::debug!(vanity = %id_or_vanity, provider = provider.name(), "Resolving vanity name");

    let account_id = provider
        .resolve_vanity(id_or_vanity)
        .await
        .map_err(|e| AppError::Resolution {
            input: id_or_vanity.to_string(),
            reason: e.to_string(),
        })?;

    tracing::info!(vanity = %id_or_vanity, account_id = %account_id, "Resolved vanity name");

    Ok(account_id)
}
