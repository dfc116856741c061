//! Diagnostic listing route

use axum::{extract::State, Json};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /debug-files
///
/// Every key in the backend, unfiltered and in store-native order.
/// Diagnostic only.
pub async fn debug_files(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let keys = state
        .store()
        .list_keys()
        .await
        .map_err(|e| AppError::backend("Could not list files", e))?;

    Ok(Json(keys))
}
