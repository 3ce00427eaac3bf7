//! Skip/limit window for list queries.

use serde::{Deserialize, Serialize};

/// Default number of rows returned by a list query.
pub const DEFAULT_LIMIT: u64 = 100;
/// Upper bound on the number of rows a single list query may return.
pub const MAX_LIMIT: u64 = 1000;

/// An offset/limit window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Number of leading rows to skip.
    pub skip: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
}

impl Window {
    /// Create a window, clamping `limit` into `1..=MAX_LIMIT`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}
