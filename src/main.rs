//! Stowage Server: authenticated file storage over HTTP.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use stowage_api::{AppState, build_app};
use stowage_core::config::{AppConfig, DatabaseProvider};
use stowage_core::error::{AppError, ErrorKind};
use stowage_core::traits::{HealthProbe, StorageProvider};
use stowage_database::DatabasePool;
use stowage_database::repositories::{
    FileRepository, MemoryFileRepository, MemoryProbe, MemoryUserRepository, PgFileRepository,
    PgUserRepository, UserRepository,
};
use stowage_storage::LocalStorageProvider;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("STOWAGE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting {} v{}", config.server.app_title, env!("CARGO_PKG_VERSION"));

    // ── Step 1: Blob storage ─────────────────────────────────────
    tracing::info!(root = %config.storage.root_path, "Initializing local storage...");
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.root_path).await?);

    // ── Step 2: Metadata store + repositories ────────────────────
    let mut db_pool = None;
    let (user_repo, file_repo, probe): (
        Arc<dyn UserRepository>,
        Arc<dyn FileRepository>,
        Arc<dyn HealthProbe>,
    ) = match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            stowage_database::migration::run_migrations(pool.pool()).await?;
            let repos = (
                Arc::new(PgUserRepository::new(pool.pool().clone())) as Arc<dyn UserRepository>,
                Arc::new(PgFileRepository::new(pool.pool().clone())) as Arc<dyn FileRepository>,
                Arc::new(pool.clone()) as Arc<dyn HealthProbe>,
            );
            db_pool = Some(pool);
            repos
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using in-memory metadata store; data is lost on restart");
            (
                Arc::new(MemoryUserRepository::new()) as Arc<dyn UserRepository>,
                Arc::new(MemoryFileRepository::new()) as Arc<dyn FileRepository>,
                Arc::new(MemoryProbe) as Arc<dyn HealthProbe>,
            )
        }
    };

    // ── Step 3: Services + router ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, user_repo, file_repo, storage, probe);
    let app = build_app(state);

    // ── Step 4: Serve ────────────────────────────────────────────
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server failed", e))?;

    // ── Step 5: Cleanup ──────────────────────────────────────────
    if let Some(pool) = db_pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
