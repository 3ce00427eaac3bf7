//! Health check handler.

use axum::Json;
use axum::extract::State;

use stowage_service::HealthReport;

use crate::state::AppState;

/// GET /v1/ping
pub async fn ping(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health_service.ping().await)
}
