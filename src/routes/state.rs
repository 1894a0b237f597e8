use std::{sync::Arc, time::Duration};

use tokio::sync::RwLock;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::{
        library::FetchOptions,
        providers::{FixtureProvider, GameDataProvider, SteamProvider},
        Session,
    },
};

/// How new sessions reach their data source
#[derive(Debug, Clone)]
pub struct ConnectSettings {
    pub steam_api_url: String,
    pub request_timeout: Duration,
    pub fetch_options: FetchOptions,
    pub demo_mode: bool,
}

impl From<&Config> for ConnectSettings {
    fn from(config: &Config) -> Self {
        Self {
            steam_api_url: config.steam_api_url.clone(),
            request_timeout: config.request_timeout(),
            fetch_options: FetchOptions {
                max_concurrent_fetches: config.max_concurrent_fetches,
                request_timeout: config.request_timeout(),
            },
            demo_mode: config.demo_mode,
        }
    }
}

impl ConnectSettings {
    /// Settings that serve fixture data
    pub fn demo() -> Self {
        Self {
            steam_api_url: String::new(),
            request_timeout: Duration::from_secs(1),
            fetch_options: FetchOptions::default(),
            demo_mode: true,
        }
    }

    fn provider(&self, api_key: &str) -> AppResult<Arc<dyn GameDataProvider>> {
        if self.demo_mode {
            return Ok(Arc::new(FixtureProvider::new()));
        }

        if api_key.trim().is_empty() {
            return Err(AppError::InvalidInput("API key cannot be empty".to_string()));
        }

        Ok(Arc::new(SteamProvider::new(
            api_key.trim().to_string(),
            self.steam_api_url.clone(),
            self.request_timeout,
        )?))
    }

    /// Builds a provider for `api_key` and opens a session for `account`
    pub async fn connect(&self, api_key: &str, account: &str) -> AppResult<Session> {
        if account.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Account id or vanity name cannot be empty".to_string(),
            ));
        }

        let provider = self.provider(api_key)?;
        Session::connect(provider, account, self.fetch_options.clone()).await
    }
}

/// Shared application state
///
/// Holds the active session. Handlers take a clone of the current session, so a
/// reconnect never interrupts requests already in progress.
#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Arc<Session>>>,
    settings: Arc<ConnectSettings>,
}

impl AppState {
    pub fn new(session: Session, settings: ConnectSettings) -> Self {
        Self {
            session: Arc::new(RwLock::new(Arc::new(session))),
            settings: Arc::new(settings),
        }
    }

    /// Connects the account named in `config`
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let settings = ConnectSettings::from(config);
        let session = settings
            .connect(&config.steam_api_key, &config.steam_account)
            .await?;
        Ok(Self::new(session, settings))
    }

    /// State backed by fixture data
    pub async fn demo() -> AppResult<Self> {
        let settings = ConnectSettings::demo();
        let session = settings.connect("", "demo").await?;
        Ok(Self::new(session, settings))
    }

    pub async fn session(&self) -> Arc<Session> {
        self.session.read().await.clone()
    }

    /// Replaces the active session with one for a new key and account
    ///
    /// The old session and its library cache are dropped once no request uses
    /// them. On failure the active session is left unchanged.
    pub async fn reconnect(&self, api_key: &str, account: &str) -> AppResult<Arc<Session>> {
        let session = Arc::new(self.settings.connect(api_key, account).await?);
        *self.session.write().await = session.clone();

        tracing::info!(account_id = %session.account_id(), "Session replaced");

        Ok(session)
    }
}
