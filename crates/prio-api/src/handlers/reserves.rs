//! Hard reserve handlers
//!
//! Listing is open to every role; mutations are officer-only (enforced in
//! the service, not here).

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use prio_service::{ReserveCreateRequest, ReserveResponse, ReserveService, ReserveUpdateRequest};

use crate::extractors::{AuthActor, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    id.parse()
        .map_err(|_| ApiError::invalid_path("Invalid reserve id format"))
}

/// List hard reserves
///
/// GET /reserves
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ReserveResponse>>> {
    let service = ReserveService::new(state.service_context());
    let reserves = service.list().await?;
    Ok(Json(reserves))
}

/// Add a hard reserve
///
/// POST /reserves
pub async fn add(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    ValidatedJson(request): ValidatedJson<ReserveCreateRequest>,
) -> ApiResult<Created<Json<ReserveResponse>>> {
    let service = ReserveService::new(state.service_context());
    let response = service.add(&actor, request).await?;
    Ok(Created(Json(response)))
}

/// Update a hard reserve
///
/// PATCH /reserves/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ReserveUpdateRequest>,
) -> ApiResult<Json<ReserveResponse>> {
    let id = parse_id(&id)?;

    let service = ReserveService::new(state.service_context());
    let response = service.update(&actor, id, request).await?;
    Ok(Json(response))
}

/// Remove a hard reserve
///
/// DELETE /reserves/{id}
pub async fn remove(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let id = parse_id(&id)?;

    let service = ReserveService::new(state.service_context());
    service.remove(&actor, id).await?;
    Ok(NoContent)
}
