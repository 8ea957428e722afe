//! Day-grid snapshot endpoint.
//!
//! Returns the complete visual model for one day: row order, block
//! geometry, and PTO overlays. The client draws exactly what it is
//! given and keeps no derivation logic of its own.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::grid::layout::build_layout;
use crate::grid::GridLayout;
use crate::state::AppState;
use crate::util::{parse_iso_date, today_iso};

use super::error::ApiError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/grid", get(day_grid))
}

#[derive(Debug, Deserialize)]
pub struct GridQuery {
    /// Defaults to today.
    pub date: Option<String>,
}

async fn day_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> Result<Json<GridLayout>, ApiError> {
    let date = match query.date {
        Some(date) => {
            if parse_iso_date(&date).is_none() {
                return Err(ApiError::bad_request(
                    "invalid_date",
                    format!("not a calendar date: {date}"),
                ));
            }
            date
        }
        None => today_iso(),
    };

    let workers = state.roster().list()?;
    let shifts = state.shifts().list(Some(&date))?;
    Ok(Json(build_layout(&date, &workers, &shifts)))
}
