//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use stowage_api::{AppState, build_app};
use stowage_core::config::AppConfig;
use stowage_core::traits::HealthProbe;
use stowage_database::repositories::{MemoryFileRepository, MemoryProbe, MemoryUserRepository};
use stowage_storage::LocalStorageProvider;

const BOUNDARY: &str = "stowage-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Blob directory
    pub storage_root: PathBuf,
    _storage_dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by in-memory repositories
    pub async fn new() -> Self {
        Self::with_probe(Arc::new(MemoryProbe)).await
    }

    /// Create a test application whose health check uses `probe`
    pub async fn with_probe(probe: Arc<dyn HealthProbe>) -> Self {
        let storage_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage_root = storage_dir.path().to_path_buf();

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root_path = storage_root.to_string_lossy().into_owned();

        let storage = Arc::new(
            LocalStorageProvider::new(&config.storage.root_path)
                .await
                .expect("Failed to init storage"),
        );

        let state = AppState::new(
            config.clone(),
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryFileRepository::new()),
            storage,
            probe,
        );

        Self {
            router: build_app(state),
            config,
            storage_root,
            _storage_dir: storage_dir,
        }
    }

    /// Number of blobs on disk
    pub fn blob_count(&self) -> usize {
        std::fs::read_dir(&self.storage_root)
            .expect("Failed to read storage dir")
            .count()
    }

    /// Register an account
    pub async fn register(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/v1/auth/register",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Submit the login form
    pub async fn login_raw(&self, email: &str, password: &str) -> TestResponse {
        let form = format!(
            "username={}&password={}",
            email.replace('@', "%40"),
            password
        );
        let req = Request::builder()
            .method("POST")
            .uri("/v1/auth/jwt/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Login and return JWT access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self.login_raw(email, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register a fresh account and return its token
    pub async fn user_token(&self, email: &str) -> String {
        let response = self.register(email, "password123").await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );
        self.login(email, "password123").await
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Upload `data` as multipart field `file`
    pub async fn upload(
        &self,
        token: &str,
        path: &str,
        file_name: &str,
        data: &[u8],
    ) -> TestResponse {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(format!("/v1/files/upload?path={path}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// Download by query string, returning raw bytes
    pub async fn download(&self, token: &str, query: &str) -> RawResponse {
        let req = Request::builder()
            .method("GET")
            .uri(format!("/v1/files/download?{query}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Unparsed response
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}
