//! Batch view handlers
//!
//! Grouped submission views built on the Batch Grouper.

use axum::{extract::State, Json};

use prio_service::{BatchResponse, BatchService};

use crate::extractors::AuthActor;
use crate::response::ApiResult;
use crate::state::AppState;

/// The caller's own submissions, grouped
///
/// GET /batches/@me
pub async fn my_batches(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    let service = BatchService::new(state.service_context());
    let batches = service.my_batches(&actor).await?;
    Ok(Json(batches))
}

/// Officer review board: every member's submissions, grouped
///
/// GET /batches
pub async fn review_board(
    State(state): State<AppState>,
    AuthActor(actor): AuthActor,
) -> ApiResult<Json<Vec<BatchResponse>>> {
    let service = BatchService::new(state.service_context());
    let batches = service.review_board(&actor).await?;
    Ok(Json(batches))
}
