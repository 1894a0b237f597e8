use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use tokio::sync::{RwLock, Semaphore};

use crate::{
    error::AppError,
    models::{AccountId, Game, OwnershipIndex},
    services::providers::GameDataProvider,
};

const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Previously fetched libraries, keyed by account
///
/// Lives as long as the session that owns it. Entries are only replaced when a
/// caller forces a refresh or invalidates them.
#[derive(Clone, Default)]
pub struct LibraryCache {
    entries: Arc<RwLock<HashMap<AccountId, Vec<Game>>>>,
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, account: &AccountId) -> Option<Vec<Game>> {
        self.entries.read().await.get(account).cloned()
    }

    pub async fn insert(&self, account: AccountId, games: Vec<Game>) {
        self.entries.write().await.insert(account, games);
    }

    /// Drops the entry for `account`, returning whether one existed
    pub async fn invalidate(&self, account: &AccountId) -> bool {
        self.entries.write().await.remove(account).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// What happened to one account during a library fetch
#[derive(Debug)]
pub enum LibraryOutcome {
    /// Served from the cache without a request
    Cached(Vec<Game>),
    /// Fetched from the provider
    Fetched(Vec<Game>),
    /// The request failed, timed out or returned an unreadable payload
    Failed(AppError),
}

impl LibraryOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LibraryOutcome::Failed(_))
    }
}

/// Per-account results of one library fetch
///
/// Holds exactly one outcome for every distinct account that was requested.
#[derive(Debug, Default)]
pub struct LibraryReport {
    outcomes: HashMap<AccountId, LibraryOutcome>,
}

impl LibraryReport {
    pub fn get(&self, account: &AccountId) -> Option<&LibraryOutcome> {
        self.outcomes.get(account)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn cache_hits(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| matches!(outcome, LibraryOutcome::Cached(_)))
            .count()
    }

    /// Accounts whose library could not be fetched, sorted by id
    pub fn failed_accounts(&self) -> Vec<AccountId> {
        let mut failed = self
            .outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_failed())
            .map(|(account, _)| account.clone())
            .collect::<Vec<_>>();
        failed.sort();
        failed
    }

    /// Flattens the report into an ownership index
    ///
    /// Failed accounts are left out entirely, so in the index a failure looks
    /// the same as an account that was never requested.
    pub fn into_ownership_index(self) -> OwnershipIndex {
        self.outcomes
            .into_iter()
            .filter_map(|(account, outcome)| match outcome {
                LibraryOutcome::Cached(games) | LibraryOutcome::Fetched(games) => {
                    Some((account, games))
                }
                LibraryOutcome::Failed(_) => None,
            })
            .collect()
    }
}

/// Tuning for [`LibraryFetcher`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Upper bound on library requests in flight at once
    pub max_concurrent_fetches: usize,
    /// Time allowed for a single library request once it has started
    pub request_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Fetches owned-game libraries concurrently, caching successful results
pub struct LibraryFetcher {
    provider: Arc<dyn GameDataProvider>,
    cache: LibraryCache,
    limiter: Arc<Semaphore>,
    request_timeout: Duration,
}

impl LibraryFetcher {
    pub fn new(provider: Arc<dyn GameDataProvider>, options: FetchOptions) -> Self {
        Self {
            provider,
            cache: LibraryCache::new(),
            limiter: Arc::new(Semaphore::new(options.max_concurrent_fetches.max(1))),
            request_timeout: options.request_timeout,
        }
    }

    pub fn cache(&self) -> &LibraryCache {
        &self.cache
    }

    /// Fetches the libraries of `accounts`
    ///
    /// Unless `force_refresh` is set, cached accounts are served without a
    /// request. Every other account gets its own task; this call waits for all
    /// of them and is the only writer of the cache. A failure for one account is
    /// recorded in the report and never fails the call.
    ///
    /// A library reported without a games list (private profile) counts as an
    /// empty library but is not cached, so the next call asks again.
    pub async fn fetch(&self, accounts: &[AccountId], force_refresh: bool) -> LibraryReport {
        let mut report = LibraryReport::default();
        let mut requested = HashSet::with_capacity(accounts.len());
        let mut tasks = Vec::new();

        for account in accounts {
            if !requested.insert(account) {
                continue;
            }

            if !force_refresh {
                if let Some(games) = self.cache.get(account).await {
                    tracing::debug!(account_id = %account, game_count = games.len(), "Library cache hit");
                    report
                        .outcomes
                        .insert(account.clone(), LibraryOutcome::Cached(games));
                    continue;
                }
            }

            let provider = self.provider.clone();
            let limiter = self.limiter.clone();
            let timeout = self.request_timeout;
            let target = account.clone();

            let task = tokio::spawn(async move {
                let _permit = match limiter.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return Err(AppError::Internal(e.to_string())),
                };

                match tokio::time::timeout(timeout, provider.owned_games(&target)).await {
                    Ok(result) => result,
                    Err(_) => Err(AppError::Fetch(format!(
                        "library request for {} timed out after {:?}",
                        target, timeout
                    ))),
                }
            });
            tasks.push((account.clone(), task));
        }

        let spawned = tasks.len();

        for (account, task) in tasks {
            let outcome = match task.await {
                Ok(Ok(Some(games))) => {
                    self.cache.insert(account.clone(), games.clone()).await;
                    LibraryOutcome::Fetched(games)
                }
                Ok(Ok(None)) => {
                    tracing::debug!(account_id = %account, "Library not visible, treating as empty");
                    self.cache.invalidate(&account).await;
                    LibraryOutcome::Fetched(Vec::new())
                }
                Ok(Err(e)) => {
                    tracing::warn!(account_id = %account, error = %e, "Library fetch failed");
                    LibraryOutcome::Failed(e)
                }
                Err(e) => {
                    tracing::error!(account_id = %account, error = %e, "Library task join error");
                    LibraryOutcome::Failed(AppError::Internal(e.to_string()))
                }
            };
            report.outcomes.insert(account, outcome);
        }

        let failed = report.failed_accounts().len();
        if failed > 0 {
            tracing::warn!(
                success_count = report.len() - failed,
                error_count = failed,
                "Partial library fetch failure"
            );
        }

        tracing::info!(
            accounts = report.len(),
            cache_hits = report.cache_hits(),
            requests = spawned,
            force_refresh,
            provider = self.provider.name(),
            "Library fetch completed"
        );

        report
    }
}
