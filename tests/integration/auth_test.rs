//! Integration tests for registration and login.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_register_login_me() {
    let app = helpers::TestApp::new().await;

    let response = app.register("alice@example.com", "password123").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "alice@example.com");
    assert_eq!(response.body["is_active"], true);
    assert!(response.body.get("hashed_password").is_none());

    let login = app.login_raw("alice@example.com", "password123").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["token_type"], "bearer");
    let token = login.body["access_token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/v1/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], response.body["id"]);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.register("bob@example.com", "password123").await;

    let response = app.login_raw("bob@example.com", "wrongpassword").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = helpers::TestApp::new().await;

    let response = app.login_raw("nobody@example.com", "password123").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_no_token_is_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/v1/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/v1/files", None, Some("garbage"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = helpers::TestApp::new().await;
    app.register("carol@example.com", "password123").await;

    let response = app.register("Carol@Example.com", "password456").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_email() {
    let app = helpers::TestApp::new().await;

    let response = app.register("dave@example.com", "1234").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.register("not-an-email", "password123").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}
