use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{non_blank, parse_filter, RecordId},
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{Event, EventChanges, EventFilter, EventRegistration, EventStatus, NewEvent, NewRegistration},
    validation::Payload,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    category: Option<String>,
}

impl ListParams {
    fn into_filter(self) -> crate::error::Result<EventFilter> {
        Ok(EventFilter {
            status: parse_filter(self.status.as_deref(), "status", EventStatus::parse)?,
            category: non_blank(self.category),
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Event>> {
    let filter = params.into_filter()?;
    let events = state.service_context.event_repo.list(&filter).await?;
    Ok(ApiResponse::ok(events))
}

pub async fn get(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Event> {
    let event = state.service_context.event_service.get(id).await?;
    Ok(ApiResponse::ok(event))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<Event> {
    let request = NewEvent::from_payload(&payload)?;
    let event = state.service_context.event_repo.create(request).await?;
    tracing::info!("Created event {} on {}", event.title, event.date.date_naive());
    Ok(ApiResponse::created(event))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<Event> {
    let changes = EventChanges::from_payload(&payload)?;
    let event = state.service_context.event_repo.update(id, changes).await?;
    Ok(ApiResponse::ok(event))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.event_repo.delete(id).await?;
    tracing::info!("Deleted event {}", id);
    Ok(ApiResponse::ok(Deleted { id }))
}

pub async fn register(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> Created<EventRegistration> {
    let request = NewRegistration::from_payload(&payload)?;
    let registration = state.service_context.event_service.register(id, request).await?;
    Ok(ApiResponse::created(registration))
}

/// Registrations for one event, oldest first
pub async fn registrations(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Vec<EventRegistration>> {
    state.service_context.event_service.get(id).await?;
    let registrations = state.service_context.event_repo.list_registrations(id).await?;
    Ok(ApiResponse::ok(registrations))
}
