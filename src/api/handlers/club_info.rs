use axum::extract::State;

use crate::{
    api::{
        handlers::RecordId,
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{ClubInfo, ClubInfoChanges, NewClubInfo},
    validation::Payload,
};

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ClubInfo>> {
    let entries = state.service_context.club_info_repo.list().await?;
    Ok(ApiResponse::ok(entries))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<ClubInfo> {
    let request = NewClubInfo::from_payload(&payload)?;
    let info = state.service_context.club_info_repo.create(request).await?;
    Ok(ApiResponse::created(info))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<ClubInfo> {
    let changes = ClubInfoChanges::from_payload(&payload)?;
    let info = state.service_context.club_info_repo.update(id, changes).await?;
    Ok(ApiResponse::ok(info))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.club_info_repo.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}
