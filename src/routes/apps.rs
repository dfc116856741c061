//! Artifact listing and download routes

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};

use crate::error::{AppError, Result, StorageError};
use crate::state::AppState;

use super::MAPP_SUFFIX;

/// GET /apps
///
/// All artifact names carrying the required suffix, sorted.
pub async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let mut names: Vec<String> = state
        .store()
        .list_keys()
        .await
        .map_err(|e| AppError::backend("Could not list apps", e))?
        .into_iter()
        .filter(|key| key.ends_with(MAPP_SUFFIX))
        .collect();

    names.sort();

    Ok(Json(names))
}

/// GET /apps/:filename
///
/// Streams the artifact payload as an attachment.
pub async fn get_app(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let bytes = match state.store().get(&filename).await {
        Ok(bytes) => bytes,
        Err(StorageError::ObjectNotFound(_)) => return Err(AppError::NotFound(filename)),
        Err(e) => return Err(AppError::backend("Could not fetch app", e)),
    };

    tracing::debug!(%filename, size = bytes.len(), "serving artifact");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}
