pub mod analytics;
pub mod announcements;
pub mod auth;
pub mod club_info;
pub mod departments;
pub mod events;
pub mod root;
pub mod stats;
pub mod suggestions;
pub mod team;
pub mod timeline;
pub mod upload;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// The `:id` path segment. Anything that is not a UUID cannot name a
/// record, so it is reported as not found rather than as a bad request.
#[derive(Debug, Clone, Copy)]
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|_| AppError::NotFound(format!("No record with id {}", raw)))
    }
}

/// Parse an optional enum query parameter; blank means "no filter".
pub(crate) fn parse_filter<T>(
    value: Option<&str>,
    field: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse(v)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {} filter: {}", field, v))),
    }
}

/// Blank query strings are treated as absent
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
