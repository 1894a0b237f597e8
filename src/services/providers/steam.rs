/// Steam Web API provider
///
/// API Flow:
/// 1. Identity: /ISteamUser/ResolveVanityURL/v1 → account id for a vanity name
/// 2. Friends: /ISteamUser/GetFriendList/v1 → friend account ids
/// 3. Profiles: /ISteamUser/GetPlayerSummaries/v2 → names and avatars, up to 100 ids per call
/// 4. Libraries: /IPlayerService/GetOwnedGames/v1 → owned games for one account
use crate::{
    error::{AppError, AppResult},
    models::{
        steam::{FriendListResponse, OwnedGamesResponse, PlayerSummariesResponse, VanityUrlResponse},
        AccountId, Friend, Game, Profile,
    },
    services::providers::{GameDataProvider, MAX_PROFILE_BATCH},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("common-games/", env!("CARGO_PKG_VERSION"));
const VANITY_MATCH: u32 = 1;

#[derive(Clone)]
pub struct SteamProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl SteamProvider {
    /// Creates a new Steam provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issues a GET against `path` and decodes the JSON body into `T`
    ///
    /// Transport failures and non-2xx statuses are fetch errors; a body that does
    /// not match `T` is a decode error.
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let url = format!("{}/{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let err = AppError::from(e);
                tracing::error!(path = %path, error = %err, "Steam API request failed");
                err
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                "Steam API request failed"
            );
            return Err(AppError::Fetch(format!(
                "Steam API returned status {} for {}",
                status, path
            )));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl GameDataProvider for SteamProvider {
    async fn resolve_vanity(&self, name: &str) -> AppResult<AccountId> {
        let response: VanityUrlResponse = self
            .get("ISteamUser/ResolveVanityURL/v1", &[("vanityurl", name)])
            .await?;

        let result = response.response;
        match result.steamid {
            Some(steamid) if result.success == VANITY_MATCH => Ok(AccountId::from(steamid)),
            _ => Err(AppError::NotFound(
                result
                    .message
                    .unwrap_or_else(|| format!("no account uses vanity name '{}'", name)),
            )),
        }
    }

    async fn friend_list(&self, account: &AccountId) -> AppResult<Vec<Friend>> {
        let response: FriendListResponse = self
            .get(
                "ISteamUser/GetFriendList/v1",
                &[("steamid", account.as_str()), ("relationship", "friend")],
            )
            .await?;

        Ok(response.into_friends())
    }

    async fn player_summaries(&self, batch: &[AccountId]) -> AppResult<Vec<Profile>> {
        if batch.len() > MAX_PROFILE_BATCH {
            return Err(AppError::InvalidInput(format!(
                "profile batch of {} exceeds the limit of {}",
                batch.len(),
                MAX_PROFILE_BATCH
            )));
        }

        let steamids = batch
            .iter()
            .map(AccountId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response: PlayerSummariesResponse = self
            .get(
                "ISteamUser/GetPlayerSummaries/v2",
                &[("steamids", steamids.as_str())],
            )
            .await?;

        Ok(response
            .response
            .players
            .into_iter()
            .map(Profile::from)
            .collect())
    }

    async fn owned_games(&self, account: &AccountId) -> AppResult<Option<Vec<Game>>> {
        let response: OwnedGamesResponse = self
            .get(
                "IPlayerService/GetOwnedGames/v1",
                &[
                    ("steamid", account.as_str()),
                    ("include_appinfo", "true"),
                    ("include_played_free_games", "true"),
                ],
            )
            .await?;

        if response.response.games.is_none() {
            tracing::debug!(
                account_id = %account,
                game_count = ?response.response.game_count,
                "Owned games list withheld"
            );
        }

        Ok(response.into_games())
    }

    fn name(&self) -> &'static str {
        "steam"
    }
}
