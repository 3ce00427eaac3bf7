//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use stowage_auth::jwt::{JwtDecoder, JwtEncoder};
use stowage_auth::password::{PasswordHasher, PasswordValidator};
use stowage_core::config::AppConfig;
use stowage_core::traits::{HealthProbe, StorageProvider};
use stowage_database::repositories::{FileRepository, UserRepository};
use stowage_service::{
    DownloadService, FileService, HealthService, UploadService, UsageService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login, token resolution
    pub user_service: Arc<UserService>,
    /// File listing
    pub file_service: Arc<FileService>,
    /// Streaming uploads
    pub upload_service: Arc<UploadService>,
    /// Streaming downloads
    pub download_service: Arc<DownloadService>,
    /// Quota reporting
    pub usage_service: Arc<UsageService>,
    /// Health check
    pub health_service: Arc<HealthService>,
}

impl AppState {
    /// Wire every service from the repositories, blob store, and probe.
    pub fn new(
        config: AppConfig,
        user_repo: Arc<dyn UserRepository>,
        file_repo: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        probe: Arc<dyn HealthProbe>,
    ) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let user_service = Arc::new(UserService::new(
            user_repo,
            password_hasher,
            password_validator,
            jwt_encoder,
            jwt_decoder,
        ));
        let file_service = Arc::new(FileService::new(Arc::clone(&file_repo)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&file_repo),
            Arc::clone(&storage),
            config.storage.clone(),
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&file_repo),
            storage,
            config.storage.chunk_size_bytes,
        ));
        let usage_service = Arc::new(UsageService::new(file_repo));
        let health_service = Arc::new(HealthService::new(probe, env!("CARGO_PKG_VERSION")));

        Self {
            config: Arc::new(config),
            user_service,
            file_service,
            upload_service,
            download_service,
            usage_service,
            health_service,
        }
    }
}
