//! Health check endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// Whether an assistant key is configured. The app works without
    /// one; the chat widget just reports the assistant as unavailable.
    pub assistant: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    // A socket that answers is health enough; the stores are plain
    // files with no connection to check.
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "shiftdesk".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        assistant: state.assistant_configured(),
    })
}
