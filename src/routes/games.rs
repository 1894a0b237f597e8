use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{AccountId, CommonGames, Friend, OwnershipIndex},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct GamesRequest {
    pub account_ids: Vec<AccountId>,
    #[serde(default)]
    pub force_refresh: bool,
}

/// Handler for owned-game libraries
///
/// Accounts whose library could not be fetched are left out of the response.
pub async fn owned(
    State(state): State<AppState>,
    Json(request): Json<GamesRequest>,
) -> Json<OwnershipIndex> {
    let index = state
        .session()
        .await
        .get_owned_games(&request.account_ids, request.force_refresh)
        .await;
    Json(index)
}

/// Handler for games shared by the connected account and the given friends
pub async fn common(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GamesRequest>,
) -> Json<CommonGames> {
    tracing::info!(
        request_id = %request_id,
        friend_count = request.account_ids.len(),
        force_refresh = request.force_refresh,
        "Processing common games request"
    );

    let friends = request
        .account_ids
        .into_iter()
        .map(Friend::new)
        .collect::<Vec<_>>();

    let result = state
        .session()
        .await
        .common_games(&friends, request.force_refresh)
        .await;

    tracing::info!(
        request_id = %request_id,
        common = result.games.len(),
        failed = result.failed_accounts.len(),
        "Common games computed"
    );

    Json(result)
}

/// Handler for dropping every cached library
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.session().await.clear_cache().await;
    StatusCode::NO_CONTENT
}

/// Handler for dropping one account's cached library
pub async fn invalidate(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> AppResult<StatusCode> {
    if state.session().await.invalidate(&account_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No cached library for account {}",
            account_id
        )))
    }
}
