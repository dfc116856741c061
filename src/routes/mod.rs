//! Route modules for the mapp gateway

pub mod apps;
pub mod debug;
pub mod ping;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Required artifact filename ending, used both to validate uploads and to
/// filter `/apps` listings. Fixed, not configurable.
pub const MAPP_SUFFIX: &str = ".mapp";

/// Largest accepted upload body.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Build the gateway router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/apps", get(apps::list_apps))
        .route("/apps/:filename", get(apps::get_app))
        .route("/upload", post(upload::upload_app))
        .route("/debug-files", get(debug::debug_files))
        .route("/ping", post(ping::ping))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
