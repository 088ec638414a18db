use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    api::{
        handlers::{non_blank, parse_filter, RecordId},
        response::{ApiResponse, ApiResult, Created, Deleted},
        state::AppState,
    },
    domain::{IdeaSuggestion, NewSuggestion, SuggestionChanges, SuggestionFilter, SuggestionStatus},
    error::AppError,
    validation::Payload,
};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    status: Option<String>,
    category: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    email: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<IdeaSuggestion>> {
    let filter = SuggestionFilter {
        status: parse_filter(params.status.as_deref(), "status", SuggestionStatus::parse)?,
        category: non_blank(params.category),
        email: exact_email(params.email),
    };
    let suggestions = state.service_context.suggestion_repo.list(&filter).await?;
    Ok(ApiResponse::ok(suggestions))
}

/// Everything one submitter has sent in, newest first
pub async fn lookup_by_email(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> ApiResult<Vec<IdeaSuggestion>> {
    let email = exact_email(params.email)
        .ok_or_else(|| AppError::BadRequest("Email parameter is required".to_string()))?;
    let suggestions = state.service_context.suggestion_repo.find_by_email(&email).await?;
    Ok(ApiResponse::ok(suggestions))
}

/// Status and admin notes in the body are ignored; submissions always
/// start out pending.
pub async fn create(
    State(state): State<AppState>,
    payload: Payload,
) -> Created<IdeaSuggestion> {
    let request = NewSuggestion::from_payload(&payload)?;
    let suggestion = state.service_context.suggestion_repo.create(request).await?;
    tracing::info!("New idea suggestion: {}", suggestion.title);
    Ok(ApiResponse::created(suggestion))
}

pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Payload,
) -> ApiResult<IdeaSuggestion> {
    let changes = SuggestionChanges::from_payload(&payload)?;
    let suggestion = state.service_context.suggestion_repo.update(id, changes).await?;
    Ok(ApiResponse::ok(suggestion))
}

pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Deleted> {
    state.service_context.suggestion_repo.delete(id).await?;
    Ok(ApiResponse::ok(Deleted { id }))
}

/// Emails match byte for byte, so only a blank value is dropped.
fn exact_email(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
