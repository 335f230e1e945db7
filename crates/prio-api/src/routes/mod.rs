//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{batches, health, items, requests, reserves};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass the main middleware stack)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(request_routes())
        .merge(batch_routes())
        .merge(reserve_routes())
        .merge(item_routes())
}

/// Loot request routes
fn request_routes() -> Router<AppState> {
    Router::new()
        // Submission and list views
        .route("/requests", post(requests::submit_batch))
        .route("/requests", get(requests::list_for_review))
        .route("/requests/@me", get(requests::list_mine))
        .route("/requests/overview", get(requests::list_overview))
        // Lifecycle transitions
        .route("/requests/:request_id", patch(requests::update_member_fields))
        .route("/requests/:request_id", delete(requests::delete))
        .route("/requests/:request_id/decision", post(requests::decide))
        .route("/requests/:request_id/resubmit", post(requests::resubmit))
        .route("/requests/:request_id/lock", post(requests::toggle_lock))
        .route(
            "/requests/:request_id/moderation",
            patch(requests::update_officer_fields),
        )
}

/// Grouped submission routes
fn batch_routes() -> Router<AppState> {
    Router::new()
        .route("/batches", get(batches::review_board))
        .route("/batches/@me", get(batches::my_batches))
}

/// Hard reserve routes
fn reserve_routes() -> Router<AppState> {
    Router::new()
        .route("/reserves", get(reserves::list))
        .route("/reserves", post(reserves::add))
        .route("/reserves/:reserve_id", patch(reserves::update))
        .route("/reserves/:reserve_id", delete(reserves::remove))
}

/// Item catalog routes
fn item_routes() -> Router<AppState> {
    Router::new().route("/items/:item_id", get(items::get_item))
}
