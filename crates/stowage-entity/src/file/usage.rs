//! Per-owner storage usage aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Count and total size of a set of file records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StorageUsage {
    /// Number of records.
    pub files: i64,
    /// Sum of `size_bytes`; zero for an empty set.
    pub used: i64,
}
