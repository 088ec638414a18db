use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{parse_bool, parse_filter, RecordId},
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{Announcement, AnnouncementChanges, NewAnnouncement},
    validation::Payload,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    active: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Announcement>> {
    let active = parse_filter(params.active.as_deref(), "active", parse_bool)?;
    let announcements = state.service_context.announcement_repo.list(active).await?;
    Ok(ApiResponse::ok(announcements))
}

/// Public feed: active announcements only
pub async fn list_active(State(state): State<AppState>) -> ApiResult<Vec<Announcement>> {
    let announcements = state.service_context.announcement_repo.list(Some(true)).await?;
    Ok(ApiResponse::ok(announcements))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<Announcement> {
    let request = NewAnnouncement::from_payload(&payload)?;
    let announcement = state.service_context.announcement_repo.create(request).await?;
    tracing::info!("Posted announcement {}", announcement.title);
    Ok(ApiResponse::created(announcement))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<Announcement> {
    let changes = AnnouncementChanges::from_payload(&payload)?;
    let announcement = state.service_context.announcement_repo.update(id, changes).await?;
    Ok(ApiResponse::ok(announcement))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.announcement_repo.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}
