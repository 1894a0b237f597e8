use std::collections::HashSet;

use crate::models::{AccountId, Game, OwnershipIndex};

/// Finds the games of `self_id` that every other account in `index` also owns
///
/// Games are matched by app id only. The result keeps the order of the self
/// account's library, duplicates included. Any account mapped to an empty library
/// empties the result.
///
/// Accounts missing from `index` take no part in the comparison. When a library
/// fetch failed and the account was dropped from the index, the result is
/// therefore computed as if that account owned everything. Callers that need to
/// know about this should check the failed accounts reported alongside the index.
///
/// If `self_id` itself is missing from `index` the result is empty.
pub fn common_games(index: &OwnershipIndex, self_id: &AccountId) -> Vec<Game> {
    let Some(own_games) = index.get(self_id) else {
        return Vec::new();
    };

    let others = index
        .iter()
        .filter(|(account, _)| *account != self_id)
        .map(|(_, games)| games.iter().map(|game| game.app_id).collect::<HashSet<_>>())
        .collect::<Vec<_>>();

    own_games
        .iter()
        .filter(|game| others.iter().all(|owned| owned.contains(&game.app_id)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me() -> AccountId {
        AccountId::from("self")
    }

    fn index(entries: &[(&str, &[(u64, &str)])]) -> OwnershipIndex {
        entries
            .iter()
            .map(|(account, games)| {
                (
                    AccountId::from(*account),
                    games.iter().map(|(id, name)| Game::new(*id, *name)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_shared_game_kept_in_own_order() {
        let index = index(&[
            ("self", &[(1, "A"), (2, "B")]),
            ("x", &[(2, "B"), (3, "C")]),
        ]);

        assert_eq!(common_games(&index, &me()), vec![Game::new(2, "B")]);
    }

    #[test]
    fn test_friend_with_empty_library_empties_result() {
        let index = index(&[("self", &[(1, "A")]), ("x", &[])]);

        assert!(common_games(&index, &me()).is_empty());
    }

    #[test]
    fn test_absent_friend_is_skipped() {
        // "x" failed to load and is not in the index, so it does not filter anything
        let index = index(&[("self", &[(1, "A")])]);

        assert_eq!(common_games(&index, &me()), vec![Game::new(1, "A")]);
    }

    #[test]
    fn test_missing_self_yields_nothing() {
        let index = index(&[("x", &[(1, "A")])]);

        assert!(common_games(&index, &me()).is_empty());
    }

    #[test]
    fn test_matches_on_app_id_not_name() {
        let index = index(&[
            ("self", &[(10, "Half-Life"), (20, "Portal")]),
            ("x", &[(10, "Half-Life (Legacy)"), (21, "Portal")]),
        ]);

        assert_eq!(common_games(&index, &me()), vec![Game::new(10, "Half-Life")]);
    }

    #[test]
    fn test_order_follows_self_library() {
        let index = index(&[
            ("self", &[(3, "C"), (1, "A"), (2, "B")]),
            ("x", &[(1, "A"), (2, "B"), (3, "C")]),
            ("y", &[(2, "B"), (3, "C"), (1, "A")]),
        ]);

        assert_eq!(
            common_games(&index, &me()),
            vec![Game::new(3, "C"), Game::new(1, "A"), Game::new(2, "B")]
        );
    }

    #[test]
    fn test_every_friend_must_own_the_game() {
        let index = index(&[
            ("self", &[(1, "A"), (2, "B"), (3, "C")]),
            ("x", &[(1, "A"), (2, "B")]),
            ("y", &[(2, "B"), (3, "C")]),
        ]);

        assert_eq!(common_games(&index, &me()), vec![Game::new(2, "B")]);
    }

    #[test]
    fn test_alone_owns_whole_library() {
        let index = index(&[("self", &[(1, "A"), (2, "B")])]);

        assert_eq!(common_games(&index, &me()).len(), 2);
    }

    #[test]
    fn test_is_pure() {
        let index = index(&[
            ("self", &[(1, "A"), (2, "B"), (4, "D")]),
            ("x", &[(4, "D"), (2, "B")]),
            ("y", &[(2, "B"), (4, "D"), (9, "Z")]),
        ]);

        let first = common_games(&index, &me());
        let second = common_games(&index, &me());
        assert_eq!(first, second);
        assert_eq!(first, vec![Game::new(2, "B"), Game::new(4, "D")]);
    }
}
