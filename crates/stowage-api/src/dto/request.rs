//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use stowage_core::types::FileId;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login e-mail.
    #[validate(email(message = "Invalid email address"), length(max = 320))]
    pub email: String,
    /// Password; policy is enforced by the account service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Login e-mail.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Upload query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuery {
    /// Virtual directory the file is filed under.
    pub path: String,
}

/// Download query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// File identifier; `id_` is accepted as well.
    #[serde(alias = "id_")]
    pub id: FileId,
}
