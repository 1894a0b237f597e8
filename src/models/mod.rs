use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

pub mod steam;

/// Identifier for an account on the upstream platform
///
/// The upstream service emits account ids as decimal text. They are kept in that
/// canonical string form and never parsed into an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Another account related to the target account by a "friend" relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friend {
    pub account_id: AccountId,
}

impl Friend {
    pub fn new(account_id: impl Into<AccountId>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

/// Display metadata for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub account_id: AccountId,
    pub display_name: String,
    pub avatar_url: String,
}

/// A game from an account's library
///
/// `app_id` is the identity used when comparing libraries. `name` is for display
/// only and is not guaranteed to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub app_id: u64,
    pub name: String,
}

impl Game {
    pub fn new(app_id: u64, name: impl Into<String>) -> Self {
        Self {
            app_id,
            name: name.into(),
        }
    }
}

/// Owned games per account, rebuilt for every comparison request
///
/// An account mapped to an empty list owns nothing. An account missing from the
/// index could not be fetched.
pub type OwnershipIndex = HashMap<AccountId, Vec<Game>>;

/// Games owned by every member of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonGames {
    /// Games in the requesting account's library order
    pub games: Vec<Game>,
    /// Accounts left out of the comparison because their library could not be fetched
    pub failed_accounts: Vec<AccountId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_serializes_as_plain_string() {
        let id = AccountId::from("76561197960287930");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""76561197960287930""#);

        let deserialized: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_account_id_keeps_leading_zeros() {
        // Canonical form is the text, so "007" and "7" stay distinct
        assert_ne!(AccountId::from("007"), AccountId::from("7"));
        assert_eq!(AccountId::from("007").to_string(), "007");
    }
}
