//! Request handlers grouped by domain.

pub mod auth;
pub mod file;
pub mod health;
pub mod user;
