//! Roster and ability-vocabulary endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::types::Worker;

use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workers", get(list_workers).put(save_worker))
        .route("/workers/{name}", delete(delete_worker))
        .route("/workers/{name}/rename", post(rename_worker))
        .route("/abilities", get(list_abilities).post(add_ability))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub new_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct RenameResponse {
    pub worker: Worker,
    /// How many shift records were moved to the new name.
    pub migrated_shifts: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddAbilityRequest {
    pub tag: String,
}

async fn list_workers(State(state): State<AppState>) -> Result<Json<Vec<Worker>>, ApiError> {
    Ok(Json(state.roster().list()?))
}

/// Insert or replace a worker record, keyed by name.
async fn save_worker(
    State(state): State<AppState>,
    Json(mut worker): Json<Worker>,
) -> Result<Json<Worker>, ApiError> {
    worker.name = worker.name.trim().to_string();
    if worker.name.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_name",
            "worker name is required",
        ));
    }
    state.roster().upsert(worker.clone())?;
    state.absorb_tags(&worker);
    Ok(Json(worker))
}

/// Shifts referencing the deleted name are left in place; they render
/// as orphans until reassigned.
async fn delete_worker(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.roster().delete(&name)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a worker and migrate every shift that referenced the old
/// name, past days included.
async fn rename_worker(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<RenameResponse>, ApiError> {
    let new_name = req.new_name.trim();
    if new_name.is_empty() {
        return Err(ApiError::bad_request(
            "invalid_name",
            "new worker name is required",
        ));
    }
    let (worker, migrated_shifts) = state.rename_worker(&name, new_name)?;
    tracing::info!(old = %name, new = %worker.name, migrated_shifts, "worker renamed");
    Ok(Json(RenameResponse {
        worker,
        migrated_shifts,
    }))
}

async fn list_abilities(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.abilities())
}

/// Add a tag to the session vocabulary. 201 when it was new, 200 when
/// it was already known; either way the full vocabulary comes back.
async fn add_ability(
    State(state): State<AppState>,
    Json(req): Json<AddAbilityRequest>,
) -> Result<(StatusCode, Json<Vec<String>>), ApiError> {
    let tag = req.tag.trim();
    if tag.is_empty() {
        return Err(ApiError::bad_request("invalid_tag", "ability tag is required"));
    }
    let added = state.add_ability(tag);
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(state.abilities())))
}
