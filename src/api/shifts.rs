//! Shift persistence endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::Shift;
use crate::util::{parse_iso_date, DAY_MINUTES};

use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shifts", get(list_shifts).post(save_shift))
        .route("/shifts/{id}", delete(delete_shift))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct SaveShiftResponse {
    pub id: String,
}

async fn list_shifts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    if let Some(date) = &query.date {
        check_date(date)?;
    }
    Ok(Json(state.shifts().list(query.date.as_deref())?))
}

/// Upsert one shift. A record without an id is created and assigned
/// one; a record with an unknown id is 404, not resurrected.
async fn save_shift(
    State(state): State<AppState>,
    Json(shift): Json<Shift>,
) -> Result<(StatusCode, Json<SaveShiftResponse>), ApiError> {
    check_date(&shift.date)?;
    if shift.start >= shift.end || shift.end > DAY_MINUTES {
        return Err(ApiError::bad_request(
            "invalid_span",
            format!("bad shift span {}..{}", shift.start, shift.end),
        ));
    }
    if !state.roster().list()?.iter().any(|w| w.name == shift.name) {
        return Err(ApiError::bad_request(
            "unknown_worker",
            format!("no worker named {}", shift.name),
        ));
    }

    let created = shift.id.is_none();
    let saved = state.shifts().save(shift)?;
    let id = saved
        .id
        .ok_or_else(|| ApiError::internal("saved shift has no id"))?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SaveShiftResponse { id })))
}

async fn delete_shift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.shifts().delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn check_date(date: &str) -> Result<(), ApiError> {
    if parse_iso_date(date).is_none() {
        return Err(ApiError::bad_request(
            "invalid_date",
            format!("not a calendar date: {date}"),
        ));
    }
    Ok(())
}
