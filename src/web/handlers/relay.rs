//! Join, send and leave handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::{ApiResponse, JoinRequest, JoinResponse, LeaveRequest, SendRequest};
use crate::web::error::ApiError;

/// POST /api/join - Register a participant and return prior history.
pub async fn join(
    State(state): State<Arc<AppState>>,
    Json(req): Json<JoinRequest>,
) -> Result<Json<ApiResponse<JoinResponse>>, ApiError> {
    let history = state.coordinator.join(&req.id, &req.callback).await?;
    Ok(Json(ApiResponse::new(JoinResponse { history })))
}

/// POST /api/send - Accept a message for broadcast.
pub async fn send(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.coordinator.send(req.into_event()).await?;
    Ok(Json(ApiResponse::ack()))
}

/// POST /api/leave - Remove a participant. Never fails.
pub async fn leave(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeaveRequest>,
) -> Json<ApiResponse<()>> {
    state.coordinator.leave(&req.id).await;
    Json(ApiResponse::ack())
}
