use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{parse_filter, RecordId},
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{NewTimelineItem, TimelineItem, TimelineItemChanges, TimelineStatus},
    validation::Payload,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<TimelineItem>> {
    let status = parse_filter(params.status.as_deref(), "status", TimelineStatus::parse)?;
    let items = state.service_context.timeline_service.list(status).await?;
    Ok(ApiResponse::ok(items))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<TimelineItem> {
    let request = NewTimelineItem::from_payload(&payload)?;
    let item = state.service_context.timeline_service.create(request).await?;
    tracing::info!("Created milestone {} with {} task(s)", item.title, item.tasks.len());
    Ok(ApiResponse::created(item))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<TimelineItem> {
    let changes = TimelineItemChanges::from_payload(&payload)?;
    let item = state.service_context.timeline_service.update(id, changes).await?;
    Ok(ApiResponse::ok(item))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.timeline_service.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}
