use axum::extract::State;

use crate::{
    api::{response::{ApiResponse, ApiResult}, state::AppState},
    domain::DashboardStats,
};

pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    let stats = state.service_context.stats_service.dashboard().await?;
    Ok(ApiResponse::ok(stats))
}
