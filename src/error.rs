use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::MissingFields(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(ref msg) => {
                tracing::error!("Database error: {}", msg);
                "Database error occurred".to_string()
            }
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                "Failed to store file".to_string()
            }
            AppError::Unauthorized => "Invalid credentials".to_string(),
            AppError::MissingFields(_) => self.to_string(),
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Validation(msg) => msg,
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let unique_violation = err
            .as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false);

        if unique_violation {
            AppError::Conflict("A record with the same unique value already exists".to_string())
        } else {
            AppError::Database(err.to_string())
        }
    }
}
