use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::AccountId, routes::AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account_id: AccountId,
}

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    #[serde(default)]
    pub api_key: String,
    /// Numeric account id or vanity name
    pub account: String,
}

/// Handler for the connected account
pub async fn get_account(State(state): State<AppState>) -> Json<AccountResponse> {
    let session = state.session().await;
    Json(AccountResponse {
        account_id: session.account_id().clone(),
    })
}

/// Handler for switching credentials
///
/// Resolves the new account before swapping sessions, so a bad key or name
/// leaves the current session in place.
pub async fn connect(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ConnectRequest>,
) -> AppResult<Json<AccountResponse>> {
    tracing::info!(request_id = %request_id, account = %request.account, "Reconnecting session");

    let session = state.reconnect(&request.api_key, &request.account).await?;

    Ok(Json(AccountResponse {
        account_id: session.account_id().clone(),
    }))
}
