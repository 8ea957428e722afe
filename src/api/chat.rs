//! Assistant endpoint. One message in, one reply out.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::util::parse_iso_date;

use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/chat", post(send_message))
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    /// The day the administrator is looking at.
    pub date: String,
}

/// The reply is opaque text. Clients compare it to the literal `OK` to
/// decide whether to reload the day; nothing else is parsed out of it.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ChatResponse {
    pub reply: String,
}

async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("empty_message", "message is required"));
    }
    if parse_iso_date(&req.date).is_none() {
        return Err(ApiError::bad_request(
            "invalid_date",
            format!("not a calendar date: {}", req.date),
        ));
    }

    let reply = state.gateway().send(text, &req.date).await?;
    Ok(Json(ChatResponse { reply }))
}
