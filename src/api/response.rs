use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::Result;

/// `{ success, data?, error?, details? }`. Errors are rendered by
/// [`crate::error::AppError`]; handlers only build the success side.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
        })
    }

    pub fn created(data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(data))
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>>;
pub type Created<T> = Result<(StatusCode, Json<ApiResponse<T>>)>;

/// Body of a successful delete
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: uuid::Uuid,
}
