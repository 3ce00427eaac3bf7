//! Integration tests for the usage report.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_usage_starts_empty_then_sums_uploads() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let response = app.request("GET", "/v1/user/status", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "files": 0, "used": 0 }));

    app.upload(&token, "u", "a.txt", b"12345").await;
    app.upload(&token, "u", "b.txt", b"1234567").await;

    let response = app.request("GET", "/v1/user/status", None, Some(&token)).await;
    assert_eq!(response.body, serde_json::json!({ "files": 2, "used": 12 }));
}

#[tokio::test]
async fn test_usage_is_per_user() {
    let app = helpers::TestApp::new().await;
    let alice = app.user_token("alice@example.com").await;
    let bob = app.user_token("bob@example.com").await;

    app.upload(&alice, "a", "a.txt", b"aaaa").await;

    let response = app.request("GET", "/v1/user/status", None, Some(&bob)).await;
    assert_eq!(response.body, serde_json::json!({ "files": 0, "used": 0 }));
}
