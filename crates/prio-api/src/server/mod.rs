//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use prio_common::{AppConfig, AppError, SessionService};
use prio_db::{create_pool, PgRequestRepository, PgReserveRepository};
use prio_service::{ItemCatalog, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors_config = state.config().cors.clone();
    let router = create_router();
    let router = apply_middleware_with_config(router, &cors_config);
    router.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = prio_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create session service
    let session_service = Arc::new(SessionService::new(
        &config.session.secret,
        config.session.max_age,
    ));

    // Create item catalog client
    let item_catalog = Arc::new(
        ItemCatalog::new(
            config.item_db.base_url.clone(),
            Duration::from_secs(config.item_db.timeout_secs),
        )
        .map_err(|e| AppError::ExternalService(e.to_string()))?,
    );

    // Create repositories
    let request_repo = Arc::new(PgRequestRepository::new(pool.clone()));
    let reserve_repo = Arc::new(PgReserveRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .request_repo(request_repo)
        .reserve_repo(reserve_repo)
        .session_service(session_service)
        .item_catalog(item_catalog)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state and application
    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
