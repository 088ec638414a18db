use axum::{
    extract::State,
    http::{header, HeaderMap},
};

use crate::{
    api::{response::{ApiResponse, Created}, state::AppState},
    domain::{NewPageView, PageView},
    validation::Payload,
};

pub async fn record_page_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Payload,
) -> Created<PageView> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let request = NewPageView::from_payload(&payload, user_agent)?;
    let view = state.service_context.page_view_repo.record(request).await?;
    Ok(ApiResponse::created(view))
}
