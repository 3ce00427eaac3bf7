//! Integration tests for upload, listing, and download.

mod helpers;

use axum::http::{StatusCode, header};

#[tokio::test]
async fn test_upload_small_file_then_list() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let upload = app.upload(&token, "docs", "test", b"hello").await;
    assert_eq!(upload.status, StatusCode::CREATED, "{:?}", upload.body);
    assert_eq!(upload.body["name"], "test");
    assert_eq!(upload.body["path"], "docs/test");
    assert_eq!(upload.body["size"], 5);
    assert_eq!(upload.body["is_downloadable"], true);

    let listing = app.request("GET", "/v1/files", None, Some(&token)).await;
    assert_eq!(listing.status, StatusCode::OK);
    let files = listing.body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "test");
    assert_eq!(files[0]["size"], 5);
    assert_eq!(listing.body["account_id"], upload.body["user_id"]);
}

#[tokio::test]
async fn test_list_accepts_post_and_trailing_slash() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;
    for i in 0..3 {
        app.upload(&token, "p", &format!("f{i}"), b"x").await;
    }

    let response = app
        .request("POST", "/v1/files/?skip=1&limit=1", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let files = response.body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "f1");
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    let upload = app.upload(&token, "bin", "blob.dat", &data).await;
    assert_eq!(upload.status, StatusCode::CREATED);
    let id = upload.body["id"].as_str().unwrap();

    let download = app.download(&token, &format!("id={id}")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.body.as_ref(), data.as_slice());
    assert_eq!(
        download.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert_eq!(
        download.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"blob.dat\""
    );
    assert_eq!(
        download.headers[header::CONTENT_LENGTH],
        data.len().to_string().as_str()
    );

    let alias = app.download(&token, &format!("id_={id}")).await;
    assert_eq!(alias.status, StatusCode::OK);
    assert_eq!(alias.body.len(), data.len());
}

#[tokio::test]
async fn test_download_keeps_non_ascii_name() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let upload = app.upload(&token, "docs", "отчёт.txt", b"quarterly").await;
    assert_eq!(upload.status, StatusCode::CREATED);
    assert_eq!(upload.body["name"], "отчёт.txt");
    let id = upload.body["id"].as_str().unwrap();

    let download = app.download(&token, &format!("id={id}")).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.body.as_ref(), b"quarterly");

    let disposition = download.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .expect("Content-Disposition should be visible ASCII");
    let encoded = disposition
        .split_once("filename*=UTF-8''")
        .map(|(_, name)| name)
        .expect("filename* parameter missing");
    assert_eq!(urlencoding::decode(encoded).unwrap(), "отчёт.txt");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;
    let data = vec![7u8; 11 * 1024 * 1024];

    let response = app.upload(&token, "big", "huge.bin", &data).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.body["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.blob_count(), 0);

    let listing = app.request("GET", "/v1/files", None, Some(&token)).await;
    assert_eq!(listing.body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_download_of_other_owners_file_is_not_found() {
    let app = helpers::TestApp::new().await;
    let alice = app.user_token("alice@example.com").await;
    let bob = app.user_token("bob@example.com").await;

    let upload = app.upload(&alice, "private", "secret.txt", b"mine").await;
    let id = upload.body["id"].as_str().unwrap();

    let response = app.download(&bob, &format!("id={id}")).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let bob_files = app.request("GET", "/v1/files", None, Some(&bob)).await;
    assert_eq!(bob_files.body["files"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_download_unknown_or_malformed_id() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let response = app
        .download(&token, "id=00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.download(&token, "id=not-a-uuid").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_path_conflicts() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let first = app.upload(&token, "dup", "same.txt", b"one").await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.upload(&token, "dup", "same.txt", b"two").await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(app.blob_count(), 1);
}

#[tokio::test]
async fn test_upload_without_file_part_is_bad_request() {
    let app = helpers::TestApp::new().await;
    let token = app.user_token("alice@example.com").await;

    let response = app
        .request("POST", "/v1/files/upload?path=x", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
