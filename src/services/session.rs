use std::{collections::HashMap, sync::Arc};

use crate::{
    error::AppResult,
    models::{AccountId, CommonGames, Friend, OwnershipIndex, Profile},
    services::{
        friends, identity, intersection,
        library::{FetchOptions, LibraryFetcher, LibraryReport},
        profiles,
        providers::GameDataProvider,
    },
};

/// One account's view of its friends and their libraries
///
/// Resolves the account once on connect and owns the library cache for its
/// whole lifetime. Reconnecting (for example with a new API key) means building
/// a new session, which starts with an empty cache.
pub struct Session {
    provider: Arc<dyn GameDataProvider>,
    account_id: AccountId,
    library: LibraryFetcher,
}

impl Session {
    /// Resolves `id_or_vanity` and opens a session for that account
    pub async fn connect(
        provider: Arc<dyn GameDataProvider>,
        id_or_vanity: &str,
        options: FetchOptions,
    ) -> AppResult<Self> {
        let account_id =
            identity::resolve_account(provider.as_ref(), id_or_vanity.trim()).await?;

        tracing::info!(
            account_id = %account_id,
            provider = provider.name(),
            "Session connected"
        );

        Ok(Self {
            library: LibraryFetcher::new(provider.clone(), options),
            provider,
            account_id,
        })
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub async fn get_friends(&self, account: &AccountId) -> AppResult<Vec<Friend>> {
        friends::list_friends(self.provider.as_ref(), account).await
    }

    pub async fn get_own_friends(&self) -> AppResult<Vec<Friend>> {
        self.get_friends(&self.account_id).await
    }

    pub async fn get_friend_profiles(
        &self,
        friends: &[Friend],
    ) -> AppResult<HashMap<AccountId, Profile>> {
        profiles::lookup_profiles(self.provider.as_ref(), friends).await
    }

    /// Per-account library results, failures included
    pub async fn fetch_libraries(
        &self,
        accounts: &[AccountId],
        force_refresh: bool,
    ) -> LibraryReport {
        self.library.fetch(accounts, force_refresh).await
    }

    /// Libraries of `accounts`; accounts that could not be fetched are absent
    pub async fn get_owned_games(
        &self,
        accounts: &[AccountId],
        force_refresh: bool,
    ) -> OwnershipIndex {
        self.fetch_libraries(accounts, force_refresh)
            .await
            .into_ownership_index()
    }

    /// Games owned by this account and every one of `friends`
    ///
    /// Friends whose library failed to load are listed in `failed_accounts` and
    /// do not restrict the result. If this account's own library fails the
    /// result is empty.
    pub async fn common_games(&self, friends: &[Friend], force_refresh: bool) -> CommonGames {
        let mut group = friends
            .iter()
            .map(|friend| friend.account_id.clone())
            .collect::<Vec<_>>();
        group.push(self.account_id.clone());

        let report = self.fetch_libraries(&group, force_refresh).await;
        let failed_accounts = report.failed_accounts();
        let index = report.into_ownership_index();
        let games = intersection::common_games(&index, &self.account_id);

        tracing::info!(
            group_size = index.len() + failed_accounts.len(),
            failed = failed_accounts.len(),
            common = games.len(),
            "Computed common games"
        );

        CommonGames {
            games,
            failed_accounts,
        }
    }

    /// Drops the cached library of `account`, returning whether one existed
    pub async fn invalidate(&self, account: &AccountId) -> bool {
        self.library.cache().invalidate(account).await
    }

    pub async fn clear_cache(&self) {
        self.library.cache().clear().await;
        tracing::info!(account_id = %self.account_id, "Library cache cleared");
    }
}
