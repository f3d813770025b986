use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::errors::{ApiError, ApiResult};
use crate::models::UploadResponse;
use crate::storage::{self, FileUpload, StorageError};
use crate::AppState;

/// Handle a multipart file upload (form field `file`)
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    tracing::info!("Received file upload request");

    let mut upload: Option<FileUpload> = None;

    // Extract file from multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or("unknown").to_string();
        tracing::debug!("Processing field: {}", field_name);

        if field_name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();

            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read uploaded file {}: {}", filename, e);
                StorageError::UploadFailed(format!("Failed to read file: {}", e))
            })?;

            upload = Some(FileUpload {
                data,
                filename,
                content_type,
            });
            break;
        }
    }

    let file = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let filename = file.filename.clone();
    let content_type = file.content_type.clone();

    tracing::info!(
        "File received: filename={}, size={} bytes, content_type={}",
        filename,
        file.data.len(),
        content_type
    );

    let stored = storage::upload_file(state.storage.as_ref(), file)
        .await
        .map_err(|e| {
            if e.is_retryable() {
                tracing::warn!("Upload of {} failed, client may retry: {}", filename, e);
            }
            ApiError::from(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: stored.url,
            object_key: stored.object_key,
            filename,
            content_type,
            size: stored.size,
            uploaded_at: Utc::now(),
        }),
    ))
}
