use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::{api::state::AppState, uploads::ALLOWED_EXTENSIONS};

const RESOURCES: [&str; 7] = [
    "events",
    "team",
    "departments",
    "timeline",
    "suggestions",
    "club-info",
    "announcements",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub extensions: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub uploads: UploadLimits,
}

/// Healthy only while the database answers
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match state.service_context.stats_service.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({
            "status": "healthy",
            "database": "connected",
            "timestamp": timestamp
        }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
                "status": "unhealthy",
                "database": "unreachable",
                "timestamp": timestamp
            })))
        }
    }
}

pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "Incubator API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Events, team, timeline and idea submissions for the student entrepreneurship club",
        resources: RESOURCES.to_vec(),
        uploads: UploadLimits {
            max_file_size: state.max_upload_size(),
            extensions: ALLOWED_EXTENSIONS.to_vec(),
        },
    })
}
