//! Deliver callback served by each participant.

use axum::{extract::State, routing::post, Json, Router};
use tokio::sync::mpsc;

use crate::chat::{ChatEvent, DELIVER_PATH};
use crate::web::dto::ApiResponse;

/// Router serving the deliver operation.
///
/// Every delivered event is forwarded to `sink`.
pub fn callback_router(sink: mpsc::UnboundedSender<ChatEvent>) -> Router {
    Router::new()
        .route(DELIVER_PATH, post(deliver))
        .with_state(sink)
}

async fn deliver(
    State(sink): State<mpsc::UnboundedSender<ChatEvent>>,
    Json(event): Json<ChatEvent>,
) -> Json<ApiResponse<()>> {
    if sink.send(event).is_err() {
        tracing::debug!("Dropped delivered event; receiver is gone");
    }
    Json(ApiResponse::ack())
}

/// Address to bind the callback listener on.
///
/// `:port` listens on every interface, like a bare port in most socket APIs.
pub fn callback_bind_addr(callback: &str) -> String {
    let callback = callback.trim();
    let callback = callback
        .strip_prefix("http://")
        .or_else(|| callback.strip_prefix("https://"))
        .unwrap_or(callback)
        .trim_end_matches('/');

    if callback.starts_with(':') {
        format!("0.0.0.0{callback}")
    } else {
        callback.to_string()
    }
}
