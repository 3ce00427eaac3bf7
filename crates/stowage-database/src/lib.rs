//! # stowage-database
//!
//! PostgreSQL connection management, migrations, the repository traits
//! used by the service layer, and their PostgreSQL and in-memory
//! implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
