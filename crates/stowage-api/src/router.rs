//! Route definitions for the Stowage HTTP API.
//!
//! All routes are mounted under `/v1`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

/// Build the versioned router without outer middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(file_routes())
        .merge(health_routes());

    Router::new().nest("/v1", api_routes).with_state(state)
}

/// Registration and login
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/jwt/login", post(handlers::auth::login))
}

/// Profile and quota
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route("/user/status", get(handlers::user::status))
}

/// Upload, list, download
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files/upload",
            post(handlers::file::upload).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::list_files),
        )
        .route(
            "/files/",
            get(handlers::file::list_files).post(handlers::file::list_files),
        )
        .route("/files/download", get(handlers::file::download))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(handlers::health::ping))
}
