use axum::extract::State;

use crate::{
    api::{
        handlers::RecordId,
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{Department, DepartmentChanges, NewDepartment},
    validation::Payload,
};

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    let departments = state.service_context.department_service.list().await?;
    Ok(ApiResponse::ok(departments))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<Department> {
    let request = NewDepartment::from_payload(&payload)?;
    let department = state.service_context.department_service.create(request).await?;
    Ok(ApiResponse::created(department))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<Department> {
    let changes = DepartmentChanges::from_payload(&payload)?;
    let department = state.service_context.department_service.update(id, changes).await?;
    Ok(ApiResponse::ok(department))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.department_service.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}
