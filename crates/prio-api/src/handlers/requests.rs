//! Loot request handlers
//!
//! Endpoints for submission, the lifecycle transitions, and the list views.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use prio_core::traits::RequestFilter;
use prio_core::RequestStatus;
use prio_service::{
    DecideRequest, LootRequestResponse, OfficerEditRequest, PublicRequestResponse, RequestService,
    SubmitBatchRequest, UpdateRequestFields,
};

use crate::extractors::{AuthActor, OptionalAuthActor, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Query parameters for the officer review list
#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub status: Option<String>,
    pub raid: Option<String>,
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse()
        .map_err(|_| ApiError::invalid_path("Invalid request id format"))
}

/// Submit a batch of loot requests
///
/// POST /requests
pub async fn submit_batch(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    ValidatedJson(request): ValidatedJson<SubmitBatchRequest>,
) -> ApiResult<Created<Json<Vec<LootRequestResponse>>>> {
    let service = RequestService::new(state.service_context());
    let created = service.submit_batch(&actor, request).await?;
    Ok(Created(Json(created)))
}

/// List the caller's own requests
///
/// GET /requests/@me
pub async fn list_mine(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
) -> ApiResult<Json<Vec<LootRequestResponse>>> {
    let service = RequestService::new(state.service_context());
    let requests = service.list_mine(&actor).await?;
    Ok(Json(requests))
}

/// Officer review list with optional status/raid filters
///
/// GET /requests?status=pending&raid=Molten%20Core
pub async fn list_for_review(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Query(query): Query<ReviewListQuery>,
) -> ApiResult<Json<Vec<LootRequestResponse>>> {
    let status = query
        .status
        .map(|s| s.parse::<RequestStatus>())
        .transpose()
        .map_err(ApiError::invalid_query)?;

    let filter = RequestFilter {
        status,
        raid: query.raid,
    };

    let service = RequestService::new(state.service_context());
    let requests = service.list_for_review(&actor, filter).await?;
    Ok(Json(requests))
}

/// Public priority overview - decided requests only, anonymous allowed
///
/// GET /requests/overview
pub async fn list_overview(
    State(state): State<AppState>,
    OptionalAuthActor(_actor): OptionalAuthActor,
) -> ApiResult<Json<Vec<PublicRequestResponse>>> {
    let service = RequestService::new(state.service_context());
    let requests = service.list_decided().await?;
    Ok(Json(requests))
}

/// Officer decision on a request
///
/// POST /requests/{id}/decision
pub async fn decide(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<DecideRequest>,
) -> ApiResult<Json<LootRequestResponse>> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    let response = service.decide(&actor, id, request).await?;
    Ok(Json(response))
}

/// Owner resubmission of a decided request
///
/// POST /requests/{id}/resubmit
pub async fn resubmit(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> ApiResult<Json<LootRequestResponse>> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    let response = service.resubmit(&actor, id).await?;
    Ok(Json(response))
}

/// Owner edit of priority/note on a decided request
///
/// PATCH /requests/{id}
pub async fn update_member_fields(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRequestFields>,
) -> ApiResult<Json<LootRequestResponse>> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    let response = service.update_member_fields(&actor, id, request).await?;
    Ok(Json(response))
}

/// Officer edit of item name, raid, or admin note
///
/// PATCH /requests/{id}/moderation
pub async fn update_officer_fields(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<OfficerEditRequest>,
) -> ApiResult<Json<LootRequestResponse>> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    let response = service.update_officer_fields(&actor, id, request).await?;
    Ok(Json(response))
}

/// Officer lock toggle
///
/// POST /requests/{id}/lock
pub async fn toggle_lock(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> ApiResult<Json<LootRequestResponse>> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    let response = service.toggle_lock(&actor, id).await?;
    Ok(Json(response))
}

/// Officer delete
///
/// DELETE /requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let id = parse_id(&id)?;

    let service = RequestService::new(state.service_context());
    service.delete(&actor, id).await?;
    Ok(NoContent)
}
