//! # stowage-entity
//!
//! Domain entity models for Stowage. Every struct in this crate is either
//! a database row or a value object passed between repositories and
//! services. Row types additionally derive `sqlx::FromRow`.

pub mod file;
pub mod user;
