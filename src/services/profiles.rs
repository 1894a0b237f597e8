use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{AccountId, Friend, Profile},
    services::providers::{GameDataProvider, MAX_PROFILE_BATCH},
};

/// Looks up display profiles for `friends`, keyed by account id
///
/// Friends are split into consecutive batches of at most [`MAX_PROFILE_BATCH`]
/// ids, requested one after another in input order. The first failing batch
/// aborts the whole lookup. An empty friend list returns an empty map without
/// any request.
pub async fn lookup_profiles(
    provider: &dyn GameDataProvider,
    friends: &[Friend],
) -> AppResult<HashMap<AccountId, Profile>> {
    let mut profiles = HashMap::with_capacity(friends.len());

    if friends.is_empty() {
        return Ok(profiles);
    }

    for (index, chunk) in friends.chunks(MAX_PROFILE_BATCH).enumerate() {
        let batch = chunk
            .iter()
            .map(|friend| friend.account_id.clone())
            .collect::<Vec<_>>();

        tracing::debug!(batch = index, size = batch.len(), "Requesting profile batch");

        for profile in provider.player_summaries(&batch).await? {
            profiles.insert(profile.account_id.clone(), profile);
        }
    }

    tracing::info!(
        requested = friends.len(),
        resolved = profiles.len(),
        provider = provider.name(),
        "Fetched friend profiles"
    );

    Ok(profiles)
}
