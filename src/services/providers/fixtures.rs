/// Fixture-backed provider
///
/// Serves a small fixed group of accounts without touching the network. Used by
/// demo mode and by the HTTP integration tests.
use crate::{
    error::AppResult,
    models::{AccountId, Friend, Game, Profile},
    services::providers::GameDataProvider,
};

/// Account id every vanity name resolves to
pub const DEMO_ACCOUNT: &str = "0";

const COUNTER_STRIKE: (u64, &str) = (1, "Counter Strike local offensive");
const BRAWLHALLA: (u64, &str) = (2, "Brawlhalla");

const FRIENDS: [(&str, &str); 3] = [("123", "Kevin"), ("234", "John"), ("345", "Amir")];

#[derive(Clone, Default)]
pub struct FixtureProvider;

impl FixtureProvider {
    pub fn new() -> Self {
        Self
    }

    fn library(account: &AccountId) -> Vec<Game> {
        let owned: &[(u64, &str)] = match account.as_str() {
            DEMO_ACCOUNT | "123" => &[COUNTER_STRIKE, BRAWLHALLA],
            "234" => &[BRAWLHALLA],
            "345" => &[COUNTER_STRIKE],
            _ => &[],
        };

        owned
            .iter()
            .map(|(app_id, name)| Game::new(*app_id, *name))
            .collect()
    }
}

#[async_trait::async_trait]
impl GameDataProvider for FixtureProvider {
    async fn resolve_vanity(&self, _name: &str) -> AppResult<AccountId> {
        Ok(AccountId::from(DEMO_ACCOUNT))
    }

    async fn friend_list(&self, _account: &AccountId) -> AppResult<Vec<Friend>> {
        Ok(FRIENDS.iter().map(|(id, _)| Friend::new(*id)).collect())
    }

    async fn player_summaries(&self, batch: &[AccountId]) -> AppResult<Vec<Profile>> {
        Ok(batch
            .iter()
            .filter_map(|account| {
                FRIENDS
                    .iter()
                    .find(|(id, _)| *id == account.as_str())
                    .map(|(id, name)| Profile {
                        account_id: account.clone(),
                        display_name: format!("{} ({})", name, id),
                        avatar_url: String::new(),
                    })
            })
            .collect())
    }

    async fn owned_games(&self, account: &AccountId) -> AppResult<Option<Vec<Game>>> {
        Ok(Some(Self::library(account)))
    }

    fn name(&self) -> &'static str {
        "fixtures"
    }
}
