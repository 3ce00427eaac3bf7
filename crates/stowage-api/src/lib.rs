//! # stowage-api
//!
//! HTTP API layer for Stowage built on Axum.
//!
//! Provides the `/v1` REST endpoints, middleware (CORS, request logging,
//! tracing), extractors, DTOs, and the mapping from `AppError` to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
