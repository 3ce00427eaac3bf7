//! Skip/limit query parameters for list endpoints.

use serde::{Deserialize, Serialize};

use stowage_core::types::Window;
use stowage_core::types::window::DEFAULT_LIMIT;

/// Query parameters for windowed list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowParams {
    /// Rows to skip (default: 0).
    pub skip: Option<u64>,
    /// Rows to return (default: 100, max: 1000).
    pub limit: Option<u64>,
}

impl WindowParams {
    /// Converts to a clamped `Window`.
    pub fn into_window(self) -> Window {
        Window::new(self.skip.unwrap_or(0), self.limit.unwrap_or(DEFAULT_LIMIT))
    }
}
