//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stowage_core::types::UserId;

/// Maximum length of an e-mail address.
pub const MAX_EMAIL_LEN: usize = 320;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login e-mail; unique case-insensitively.
    pub email: String,
    /// Argon2id PHC hash string.
    #[serde(skip_serializing)]
    pub hashed_password: String,
    /// Inactive users cannot authenticate.
    pub is_active: bool,
    /// Superuser flag (carried, not used for authorization).
    pub is_superuser: bool,
    /// Whether the e-mail address has been verified.
    pub is_verified: bool,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check if the user can authenticate right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login e-mail.
    pub email: String,
    /// Pre-computed password hash.
    pub hashed_password: String,
}
