//! Error envelope shared by every API handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::assistant::AssistantError;
use crate::store::StoreError;

/// Wire shape of every non-2xx body.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal_error",
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::NotFound(what) => Self::not_found(format!("{what} not found")),
            StoreError::NameTaken(name) => {
                Self::conflict("name_taken", format!("name already in use: {name}"))
            }
            _ => {
                tracing::error!(error = %err, "store failure");
                Self::internal("storage failure")
            }
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match &err {
            AssistantError::NoApiKey => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "assistant_unconfigured",
                message: err.to_string(),
            },
            AssistantError::Context(inner) => {
                tracing::error!(error = %inner, "assistant context failure");
                Self::internal("storage failure")
            }
            _ => {
                tracing::warn!(error = %err, "assistant call failed");
                Self {
                    status: StatusCode::BAD_GATEWAY,
                    code: "assistant_failed",
                    message: err.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                code: self.code.to_string(),
                message: self.message,
            }),
        )
            .into_response()
    }
}
