use std::path::PathBuf;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Allowed image MIME types and the extension stored files get
const ALLOWED_MIME_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Allowed extensions on the submitted filename
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// URL prefix the uploads directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// What the image belongs to; also the sub-directory it is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Event,
    Team,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Event => "event",
            UploadKind::Team => "team",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "event" => Some(UploadKind::Event),
            "team" => Some(UploadKind::Team),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    pub filename: String,
    /// Public URL path, e.g. `/uploads/event/eventImage-1700000000000-42.png`
    pub path: String,
    pub size: usize,
    pub mimetype: String,
}

/// Check MIME type, filename extension and size. Returns the extension
/// the stored file will use.
pub fn validate_image(
    original_name: Option<&str>,
    mimetype: &str,
    size: usize,
    max_size: usize,
) -> Result<&'static str> {
    let extension = ALLOWED_MIME_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(mimetype.trim()))
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid file type {}. Allowed: JPEG, PNG, GIF, WebP",
                mimetype
            ))
        })?;

    if let Some(given) = original_name.and_then(|name| name.rsplit_once('.')).map(|(_, ext)| ext.to_lowercase()) {
        if !ALLOWED_EXTENSIONS.contains(&given.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid file extension .{}. Allowed: {}",
                given,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }
    }

    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    if size > max_size {
        return Err(AppError::Validation(format!(
            "File too large (max {} MB)",
            max_size / (1024 * 1024)
        )));
    }

    Ok(extension)
}

/// `{kind}Image-{unix millis}-{random}.{ext}`
pub fn generate_filename(kind: UploadKind, extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!(
        "{}Image-{}-{}.{}",
        kind.as_str(),
        Utc::now().timestamp_millis(),
        suffix,
        extension
    )
}

/// Validate and save an uploaded image under `{uploads_dir}/{kind}/`.
pub async fn save_image(
    uploads_dir: &str,
    kind: UploadKind,
    original_name: Option<&str>,
    mimetype: &str,
    data: &[u8],
    max_size: usize,
) -> Result<StoredUpload> {
    let extension = validate_image(original_name, mimetype, data.len(), max_size)?;

    // Ensure the per-kind directory exists
    let dir = PathBuf::from(uploads_dir).join(kind.as_str());
    fs::create_dir_all(&dir).await.map_err(|e| {
        AppError::Storage(format!("Failed to create uploads directory: {}", e))
    })?;

    let filename = generate_filename(kind, extension);
    let file_path = dir.join(&filename);

    let mut file = fs::File::create(&file_path).await.map_err(|e| {
        AppError::Storage(format!("Failed to create file: {}", e))
    })?;

    file.write_all(data).await.map_err(|e| {
        AppError::Storage(format!("Failed to write file: {}", e))
    })?;
    file.flush().await.map_err(|e| {
        AppError::Storage(format!("Failed to write file: {}", e))
    })?;

    tracing::info!("Stored {} upload {} ({} bytes)", kind.as_str(), filename, data.len());

    Ok(StoredUpload {
        path: format!("{}/{}/{}", PUBLIC_PREFIX, kind.as_str(), filename),
        filename,
        size: data.len(),
        mimetype: mimetype.to_string(),
    })
}
