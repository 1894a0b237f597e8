use crate::{
    error::AppResult,
    models::{AccountId, Friend},
    services::providers::GameDataProvider,
};

/// Lists the friends of `account`
///
/// Transport and decode failures propagate. An account with no friends yields an
/// empty list.
pub async fn list_friends(
    provider: &dyn GameDataProvider,
    account: &AccountId,
) -> AppResult<Vec<Friend>> {
    let friends = provider.friend_list(account).await?;

    tracing::info!(
        account_id = %account,
        friend_count = friends.len(),
        provider = provider.name(),
        "Fetched friend list"
    );

    Ok(friends)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::providers::MockGameDataProvider};

    #[tokio::test]
    async fn test_friends_are_returned_in_upstream_order() {
        let mut provider = MockGameDataProvider::new();
        provider
            .expect_friend_list()
            .withf(|account: &AccountId| account.as_str() == "1")
            .times(1)
            .returning(|_| Ok(vec![Friend::new("3"), Friend::new("2")]));
        provider.expect_name().return_const("mock");

        let friends = list_friends(&provider, &AccountId::from("1")).await.unwrap();
        assert_eq!(friends, vec![Friend::new("3"), Friend::new("2")]);
    }

    #[tokio::test]
    async fn test_no_friends_is_not_an_error() {
        let mut provider = MockGameDataProvider::new();
        provider.expect_friend_list().returning(|_| Ok(vec![]));
        provider.expect_name().return_const("mock");

        let friends = list_friends(&provider, &AccountId::from("1")).await.unwrap();
        assert!(friends.is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let mut provider = MockGameDataProvider::new();
        provider
            .expect_friend_list()
            .returning(|_| Err(AppError::Fetch("401 Unauthorized".to_string())));

        let result = list_friends(&provider, &AccountId::from("1")).await;
        assert!(matches!(result, Err(AppError::Fetch(_))));
    }
}
