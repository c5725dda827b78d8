use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::error::GatewayError;
use super::payload::{InvalidateRequest, SearchRequest};
use super::state::HandlerState;
use crate::cache::CACHE_STATUS_HEADER;

/// `POST /v1/jobs/search`
#[instrument(skip(state, request), fields(request_id = %Uuid::new_v4()))]
pub async fn search_handler(
    State(state): State<HandlerState>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, GatewayError> {
    request.validate().map_err(GatewayError::InvalidRequest)?;

    let query = request.to_query();
    let profile = request.to_profile();

    let (response, cache_status) = state.orchestrator.search(&query, &profile).await?;

    info!(
        total = response.total,
        page = response.page,
        cache = cache_status.as_str(),
        "search served"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_STATUS_HEADER,
        HeaderValue::from_static(cache_status.as_str()),
    );

    Ok((StatusCode::OK, headers, Json(response)).into_response())
}

/// `POST /v1/jobs/invalidate`
#[instrument(skip(state, request))]
pub async fn invalidate_handler(
    State(state): State<HandlerState>,
    Json(request): Json<InvalidateRequest>,
) -> Result<Response, GatewayError> {
    if request.job_title.trim().is_empty() || request.city.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "jobTitle and city must not be empty".to_string(),
        ));
    }

    state.orchestrator.invalidate(&request.to_query());
    info!("cache entry invalidated");

    Ok((StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response())
}
