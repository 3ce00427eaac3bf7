//! File domain entities.

pub mod filter;
pub mod model;
pub mod usage;

pub use filter::FileFilter;
pub use model::{CreateFileRecord, FileRecord};
pub use usage::StorageUsage;
