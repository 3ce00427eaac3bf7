//! # stowage-service
//!
//! Business logic for Stowage. Each service orchestrates repositories,
//! the blob store, and authentication to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod health;
pub mod user;

pub use context::RequestContext;
pub use file::{DownloadService, FileService, UploadService, UsageService};
pub use health::{DbStatus, HealthReport, HealthService};
pub use user::UserService;
