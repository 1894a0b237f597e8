/// Game data provider abstraction
///
/// This module provides a pluggable data source for account, friend, profile and
/// library lookups. The Steam Web API is the production source; the fixture
/// provider serves a fixed data set for offline use and UI development.
///
/// Providers expose one raw upstream call per operation. Batching, caching and
/// fan-out live in the services built on top of them.
use crate::{
    error::AppResult,
    models::{AccountId, Friend, Game, Profile},
};

pub mod fixtures;
pub mod steam;

pub use fixtures::FixtureProvider;
pub use steam::SteamProvider;

/// Trait for game data providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GameDataProvider: Send + Sync {
    /// Resolve a vanity name to the account id it belongs to
    async fn resolve_vanity(&self, name: &str) -> AppResult<AccountId>;

    /// List the accounts related to `account` by a "friend" relationship
    ///
    /// An account without friends yields an empty list rather than an error.
    async fn friend_list(&self, account: &AccountId) -> AppResult<Vec<Friend>>;

    /// Fetch display profiles for one batch of accounts
    ///
    /// Callers must not pass more than [`MAX_PROFILE_BATCH`] ids.
    async fn player_summaries(&self, batch: &[AccountId]) -> AppResult<Vec<Profile>>;

    /// Fetch the games owned by `account`
    ///
    /// Returns `None` when the upstream response has no games list at all, which
    /// is how private libraries are reported.
    async fn owned_games(&self, account: &AccountId) -> AppResult<Option<Vec<Game>>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Largest number of ids the profile endpoint accepts in one request
pub const MAX_PROFILE_BATCH: usize = 100;
