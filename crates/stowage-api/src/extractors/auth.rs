//! `AuthUser` extractor: pulls the bearer token from the Authorization header
//! and resolves it to an active account.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use stowage_core::error::AppError;
use stowage_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Strip the `Bearer` scheme (case-insensitive) from a header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = bearer_token(auth_header)
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let ctx = state.user_service.resolve_token(token).await?;
        Ok(AuthUser(ctx))
    }
}
