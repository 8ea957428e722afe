//! HTTP surface and routing.

pub mod error;

mod chat;
mod grid;
mod health;
mod shifts;
mod workers;

use std::path::Path;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the main router: the JSON API under `/api`, health at the
/// root, and the static frontend from `assets_dir` for everything else.
pub fn create_router(state: AppState, assets_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(Any);

    let api = Router::new()
        .merge(workers::routes())
        .merge(shifts::routes())
        .merge(grid::routes())
        .merge(chat::routes());

    Router::new()
        .merge(health::routes())
        .nest("/api", api)
        .fallback_service(ServeDir::new(assets_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
