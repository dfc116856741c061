//! Artifact upload route

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::resolver::{resolve_unique_name, ResolveError};
use crate::state::AppState;

use super::MAPP_SUFFIX;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Name the artifact was stored under, possibly renamed.
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renamed: Option<bool>,
}

/// POST /upload
///
/// Accepts a multipart form with a `file` field. The filename must end in
/// `.mapp`; a name already present in the store is renamed collision-safe
/// before the write.
pub async fn upload_app(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        AppError::InvalidArgument("No file provided")
    })? {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_owned)
                .ok_or(AppError::InvalidArgument("No file provided"))?;
            let data = field.bytes().await.map_err(|e| {
                tracing::debug!("Failed to read file data: {}", e);
                AppError::InvalidArgument("No file provided")
            })?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) = upload.ok_or(AppError::InvalidArgument("No file provided"))?;

    if !filename.ends_with(MAPP_SUFFIX) {
        return Err(AppError::InvalidArgument("Only .mapp files allowed"));
    }

    // ThreadRng is not Send, so handlers seed a StdRng per request.
    let mut rng = StdRng::from_entropy();

    let final_name = resolve_unique_name(
        &filename,
        |name| {
            let store = Arc::clone(state.store());
            async move { store.exists(&name).await }
        },
        &mut rng,
    )
    .await
    .map_err(|e| match e {
        ResolveError::Exhausted { desired, .. } => AppError::NameResolutionExhausted(desired),
        ResolveError::Backend(source) => AppError::backend("Upload failed", source),
    })?;

    state
        .store()
        .put(&final_name, data.to_vec())
        .await
        .map_err(|e| AppError::backend("Upload failed", e))?;

    let renamed = final_name != filename;

    tracing::info!(
        original = %filename,
        stored = %final_name,
        renamed,
        size = data.len(),
        "artifact uploaded"
    );

    Ok(Json(UploadResponse {
        success: true,
        filename: final_name,
        original_filename: renamed.then(|| filename.clone()),
        renamed: renamed.then_some(true),
    }))
}
