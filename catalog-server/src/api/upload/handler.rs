//! Image Upload Handler
//!
//! Accepts one or many files from the admin form and pushes each through the
//! asset store client. Files process sequentially within a request; ordering
//! between them does not matter downstream.

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::core::ServerState;
use crate::services::StoredAsset;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub uploads: Vec<StoredAsset>,
}

/// POST /api/upload - 上传图片 (multipart, 字段名 files 或 file)
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());
        if matches!(name.as_deref(), Some("files") | Some("file") | Some("")) {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                .to_vec();
            files.push((filename, data));
        }
    }

    if files.is_empty() {
        return Err(AppError::validation("No file uploaded"));
    }

    let mut uploads = Vec::with_capacity(files.len());
    for (filename, data) in files {
        if data.is_empty() {
            return Err(AppError::validation(format!("Empty file: {}", filename)));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large: {} ({} bytes, max {})",
                filename,
                data.len(),
                MAX_FILE_SIZE
            )));
        }

        let stored = state.assets.upload(&data).await?;
        tracing::info!(
            original_name = %filename,
            public_id = %stored.public_id,
            "Image uploaded"
        );
        uploads.push(stored);
    }

    Ok(Json(UploadResponse { uploads }))
}
