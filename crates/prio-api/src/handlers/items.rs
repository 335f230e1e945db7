//! Item catalog handlers
//!
//! Proxy lookup against the external game database; failure degrades to a
//! placeholder name, never an error.

use axum::{
    extract::{Path, State},
    Json,
};

use prio_service::ItemInfoResponse;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Look up item metadata by id
///
/// GET /items/{item_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<ItemInfoResponse>> {
    let item_id: i64 = item_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid item id format"))?;

    let name = state.service_context().item_catalog().item_name(item_id).await;

    Ok(Json(ItemInfoResponse { id: item_id, name }))
}
