use axum::extract::{Multipart, State};

use crate::{
    api::{response::{ApiResponse, ApiResult}, state::AppState},
    error::AppError,
    uploads::{self, StoredUpload, UploadKind},
};

struct ImageField {
    filename: Option<String>,
    mimetype: String,
    data: Vec<u8>,
}

/// Multipart upload with an `image` file and a `type` of `event` or `team`
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<StoredUpload> {
    let mut image: Option<ImageField> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().map(str::to_string);
                let mimetype = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                image = Some(ImageField {
                    filename,
                    mimetype,
                    data: data.to_vec(),
                });
            }
            "type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid type field: {}", e)))?;
                kind = Some(value);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let kind = kind
        .as_deref()
        .and_then(UploadKind::parse)
        .ok_or_else(|| {
            AppError::BadRequest("Invalid upload type (expected 'event' or 'team')".to_string())
        })?;

    let stored = uploads::save_image(
        state.uploads_dir(),
        kind,
        image.filename.as_deref(),
        &image.mimetype,
        &image.data,
        state.max_upload_size(),
    )
    .await?;

    Ok(ApiResponse::ok(stored))
}
