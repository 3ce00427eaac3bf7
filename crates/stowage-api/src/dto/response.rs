//! Response DTOs.

use serde::Serialize;

/// Access token issued by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl From<stowage_service::user::LoginResult> for TokenResponse {
    fn from(result: stowage_service::user::LoginResult) -> Self {
        Self {
            access_token: result.access_token,
            token_type: result.token_type,
        }
    }
}
