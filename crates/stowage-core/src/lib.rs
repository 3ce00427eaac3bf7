//! # stowage-core
//!
//! Core crate for Stowage. Contains configuration schemas, typed
//! identifiers, the skip/limit window type, the storage and health-probe
//! traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Stowage crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
