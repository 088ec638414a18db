use axum::extract::State;
use serde::Serialize;

use crate::{
    api::{response::{ApiResponse, ApiResult}, state::AppState},
    error::AppError,
    validation::{Missing, Payload},
};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

/// Check the dashboard credentials against the configured admin account.
/// Nothing is issued on success; the dashboard keeps its own flag.
pub async fn login(
    State(state): State<AppState>,
    payload: Payload,
) -> ApiResult<LoginResponse> {
    let mut missing = Missing::new();
    let username = payload.required_text("username", &mut missing);
    let password = payload.required_text("password", &mut missing);
    missing.check()?;

    let admin = &state.settings.admin;
    if username != admin.username || password != admin.password {
        tracing::warn!("Failed dashboard login for {}", username);
        return Err(AppError::Unauthorized);
    }

    tracing::info!("Dashboard login for {}", username);
    Ok(ApiResponse::ok(LoginResponse { username }))
}
