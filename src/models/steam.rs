// ============================================================================
// Steam Web API Types
// ============================================================================

use serde::Deserialize;

use super::{AccountId, Friend, Game, Profile};

/// Response from ISteamUser/ResolveVanityURL
#[derive(Debug, Deserialize)]
pub struct VanityUrlResponse {
    pub response: VanityUrlResult,
}

#[derive(Debug, Deserialize)]
pub struct VanityUrlResult {
    /// 1 on a match, 42 when no account uses the vanity name
    pub success: u32,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response from ISteamUser/GetFriendList
///
/// Accounts without friends come back without a `friends` entry, so every level
/// defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct FriendListResponse {
    #[serde(default)]
    pub friendslist: SteamFriendList,
}

#[derive(Debug, Default, Deserialize)]
pub struct SteamFriendList {
    #[serde(default)]
    pub friends: Vec<SteamFriend>,
}

#[derive(Debug, Deserialize)]
pub struct SteamFriend {
    pub steamid: String,
}

impl From<SteamFriend> for Friend {
    fn from(friend: SteamFriend) -> Self {
        Friend::new(AccountId::from(friend.steamid))
    }
}

impl FriendListResponse {
    pub fn into_friends(self) -> Vec<Friend> {
        self.friendslist
            .friends
            .into_iter()
            .map(Friend::from)
            .collect()
    }
}

/// Response from ISteamUser/GetPlayerSummaries
#[derive(Debug, Deserialize)]
pub struct PlayerSummariesResponse {
    pub response: PlayerSummaries,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSummaries {
    pub players: Vec<SteamPlayerSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SteamPlayerSummary {
    pub steamid: String,
    pub personaname: String,
    #[serde(default)]
    pub avatar: String,
}

impl From<SteamPlayerSummary> for Profile {
    fn from(summary: SteamPlayerSummary) -> Self {
        Profile {
            account_id: AccountId::from(summary.steamid),
            display_name: summary.personaname,
            avatar_url: summary.avatar,
        }
    }
}

/// Response from IPlayerService/GetOwnedGames
///
/// Private libraries come back as `{"response": {}}`, which leaves `games` unset.
#[derive(Debug, Deserialize)]
pub struct OwnedGamesResponse {
    pub response: OwnedGames,
}

#[derive(Debug, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: Option<u32>,
    #[serde(default)]
    pub games: Option<Vec<SteamOwnedGame>>,
}

#[derive(Debug, Deserialize)]
pub struct SteamOwnedGame {
    pub appid: u64,
    #[serde(default)]
    pub name: String,
}

impl From<SteamOwnedGame> for Game {
    fn from(game: SteamOwnedGame) -> Self {
        Game {
            app_id: game.appid,
            name: game.name,
        }
    }
}

impl OwnedGamesResponse {
    /// Owned games, or `None` when the library is not visible
    pub fn into_games(self) -> Option<Vec<Game>> {
        self.response
            .games
            .map(|games| games.into_iter().map(Game::from).collect())
    }
}
