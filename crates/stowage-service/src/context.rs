//! Request context carrying the authenticated user.

use stowage_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the API layer from a validated bearer token and passed into
/// service methods so every operation knows *who* is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
