//! Account self-service handlers.

use axum::Json;
use axum::extract::State;

use stowage_entity::file::StorageUsage;
use stowage_entity::user::User;

use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /v1/users/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(user))
}

/// GET /v1/user/status
pub async fn status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StorageUsage>, ApiError> {
    let usage = state.usage_service.usage(&auth).await?;
    Ok(Json(usage))
}
