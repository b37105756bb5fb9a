use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::auth::guard::AdminUser;
use crate::errors::AppError;
use crate::media::{resolver, upload};
use crate::state::AppState;

/// POST /api/upload — multipart upload of a single package image under the
/// field name `file`.
pub async fn handle_upload(
    State(state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut file: Option<(String, String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            file = Some((filename, mime_type, data));
            break;
        }
    }

    let (filename, mime_type, data) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let policy = upload::UploadPolicy::images(state.config.max_upload_bytes);
    let stored_path = upload::allocate(&filename, &mime_type, data.len() as u64, &policy)?;

    upload::store(Path::new(&state.config.public_dir), &stored_path, &data).await?;

    Ok(Json(json!({
        "success": true,
        "path": stored_path,
        "url": resolver::resolve(&stored_path, &state.config.base_url),
        "filename": stored_path.rsplit('/').next().unwrap_or_default(),
    })))
}
