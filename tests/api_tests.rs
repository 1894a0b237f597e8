use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use common_games::routes::{create_router, AppState};

async fn create_test_server() -> TestServer {
    let state = AppState::demo().await.unwrap();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server().await;
    let id = "0b6c3cf4-6f5e-4a3e-9d53-3f6f2c1d7a10";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_account_and_friends() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/account").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "account_id": "0" }));

    let response = server.get("/api/v1/friends").await;
    response.assert_status_ok();
    let friends: Vec<Value> = response.json();
    let ids = friends
        .iter()
        .map(|f| f["account_id"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["123", "234", "345"]);
}

#[tokio::test]
async fn test_profiles_keyed_by_account() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/profiles")
        .json(&json!({ "account_ids": ["123", "345"] }))
        .await;

    response.assert_status_ok();
    let profiles: Value = response.json();
    assert_eq!(profiles["123"]["display_name"], "Kevin (123)");
    assert_eq!(profiles["345"]["display_name"], "Amir (345)");
    assert!(profiles.get("234").is_none());
}

#[tokio::test]
async fn test_profiles_for_nobody() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/profiles")
        .json(&json!({ "account_ids": [] }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({}));
}

#[tokio::test]
async fn test_owned_games_index() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/games/owned")
        .json(&json!({ "account_ids": ["0", "234"] }))
        .await;

    response.assert_status_ok();
    let index: Value = response.json();
    assert_eq!(index["0"].as_array().unwrap().len(), 2);
    assert_eq!(index["234"], json!([{ "app_id": 2, "name": "Brawlhalla" }]));
}

#[tokio::test]
async fn test_common_games() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/games/common")
        .json(&json!({ "account_ids": ["123", "234"] }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "games": [{ "app_id": 2, "name": "Brawlhalla" }],
        "failed_accounts": []
    }));

    let response = server
        .post("/api/v1/games/common")
        .json(&json!({ "account_ids": ["234", "345"], "force_refresh": true }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["games"], json!([]));
}

#[tokio::test]
async fn test_common_games_alone_returns_own_library() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/games/common")
        .json(&json!({ "account_ids": [] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["games"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cache_invalidation() {
    let server = create_test_server().await;

    server
        .post("/api/v1/games/owned")
        .json(&json!({ "account_ids": ["123"] }))
        .await
        .assert_status_ok();

    server
        .delete("/api/v1/cache/123")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .delete("/api/v1/cache/123")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .delete("/api/v1/cache")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_reconnect_replaces_session() {
    let server = create_test_server().await;

    let response = server
        .put("/api/v1/session")
        .json(&json!({ "account": "somebody" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "account_id": "0" }));

    let response = server
        .put("/api/v1/session")
        .json(&json!({ "account": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("cannot be empty"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/games/common")
        .json(&json!({ "friends": ["123"] }))
        .expect_failure()
        .await;

    assert!(response.status_code().is_client_error());
}
