//! Integration tests for the health endpoint.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use stowage_core::error::AppError;
use stowage_core::result::AppResult;
use stowage_core::traits::HealthProbe;

#[derive(Debug)]
struct BrokenProbe;

#[async_trait]
impl HealthProbe for BrokenProbe {
    fn name(&self) -> &str {
        "broken"
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::database("database is unreachable"))
    }
}

#[tokio::test]
async fn test_ping_reports_latency() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/v1/ping", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["api"], "v1");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
    assert!(response.body["db"].is_number());
}

#[tokio::test]
async fn test_ping_reports_store_error() {
    let app = helpers::TestApp::with_probe(Arc::new(BrokenProbe)).await;

    let response = app.request("GET", "/v1/ping", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let db = response.body["db"].as_str().unwrap();
    assert_eq!(db, "database is unreachable");
}
