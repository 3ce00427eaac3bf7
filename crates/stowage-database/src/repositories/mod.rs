//! Repository traits and their implementations.

pub mod file;
pub mod memory;
pub mod user;

pub use file::{FileRepository, PgFileRepository};
pub use memory::{MemoryFileRepository, MemoryProbe, MemoryUserRepository};
pub use user::{PgUserRepository, UserRepository};
