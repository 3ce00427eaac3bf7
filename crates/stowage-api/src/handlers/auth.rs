//! Auth handlers: register and password login.

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use validator::Validate;

use stowage_entity::user::User;

use crate::dto::request::{LoginForm, RegisterRequest};
use crate::dto::response::TokenResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(req) = body?;
    req.validate()?;

    let user = state.user_service.register(&req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /v1/auth/jwt/login
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Form(form) = form?;
    form.validate()?;

    let result = state
        .user_service
        .login(&form.username, &form.password)
        .await?;
    Ok(Json(result.into()))
}
