use axum::{extract::State, Json};
use serde::Deserialize;
use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{AccountId, Friend, Profile},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProfilesRequest {
    pub account_ids: Vec<AccountId>,
}

/// Handler for the connected account's friend list
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Friend>>> {
    let friends = state.session().await.get_own_friends().await?;
    Ok(Json(friends))
}

/// Handler for profile lookup
pub async fn profiles(
    State(state): State<AppState>,
    Json(request): Json<ProfilesRequest>,
) -> AppResult<Json<HashMap<AccountId, Profile>>> {
    let friends = request
        .account_ids
        .into_iter()
        .map(Friend::new)
        .collect::<Vec<_>>();

    let profiles = state.session().await.get_friend_profiles(&friends).await?;
    Ok(Json(profiles))
}
