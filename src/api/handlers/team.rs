use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{non_blank, RecordId},
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{NewTeamMember, TeamMember, TeamMemberChanges},
    validation::Payload,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    department: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<TeamMember>> {
    let department = non_blank(params.department);
    let members = state.service_context.team_service
        .list(department.as_deref())
        .await?;
    Ok(ApiResponse::ok(members))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<TeamMember> {
    let request = NewTeamMember::from_payload(&payload)?;
    let member = state.service_context.team_service.create(request).await?;
    Ok(ApiResponse::created(member))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<TeamMember> {
    let changes = TeamMemberChanges::from_payload(&payload)?;
    let member = state.service_context.team_service.update(id, changes).await?;
    Ok(ApiResponse::ok(member))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.team_service.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}
