//! Account operations: registration, password login, and token resolution.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use stowage_auth::jwt::{JwtDecoder, JwtEncoder};
use stowage_auth::password::{PasswordHasher, PasswordValidator};
use stowage_core::error::AppError;
use stowage_core::result::AppResult;
use stowage_database::repositories::UserRepository;
use stowage_entity::user::model::MAX_EMAIL_LEN;
use stowage_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Token type reported alongside every access token.
pub const TOKEN_TYPE: &str = "bearer";

/// Handles account lifecycle and credential checks.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// Access token issuer.
    encoder: Arc<JwtEncoder>,
    /// Access token verifier.
    decoder: Arc<JwtDecoder>,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Signed JWT.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Register a new account.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let email = email.trim();
        if email.is_empty() || email.len() > MAX_EMAIL_LEN || !email.contains('@') {
            return Err(AppError::validation("Invalid email address"));
        }
        self.validator.validate(password)?;

        let hashed_password = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email: email.to_string(),
                hashed_password,
            })
            .await?;

        info!(user_id = %user.id, "User {} has registered", user.id);
        Ok(user)
    }

    /// Check credentials and issue an access token.
    ///
    /// Unknown e-mail, wrong password, and inactive account all produce the
    /// same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResult> {
        let invalid = || AppError::authentication("Invalid email or password");

        let Some(user) = self.user_repo.find_by_email(email.trim()).await? else {
            warn!("Login attempt for unknown account");
            return Err(invalid());
        };

        if !self.hasher.verify_password(password, &user.hashed_password)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid());
        }
        if !user.can_login() {
            warn!(user_id = %user.id, "Login failed: account inactive");
            return Err(invalid());
        }

        let token = self.encoder.issue(user.id)?;
        info!(user_id = %user.id, expires_at = %token.expires_at, "User logged in");

        Ok(LoginResult {
            access_token: token.access_token,
            token_type: TOKEN_TYPE.to_string(),
        })
    }

    /// Turn a bearer token into a request context for an active user.
    pub async fn resolve_token(&self, token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode(token)?;
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .filter(User::can_login)
            .ok_or_else(|| AppError::authentication("Account is not available"))?;

        Ok(RequestContext::new(user.id))
    }

    /// Profile of the authenticated user.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
