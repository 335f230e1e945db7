//! Service context - dependency container for services
//!
//! Holds the repositories and collaborators every service needs.

use std::sync::Arc;

use prio_common::SessionService;
use prio_core::traits::{RequestRepository, ReserveRepository};
use prio_db::PgPool;

use super::item_catalog::ItemCatalog;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Session token verification
/// - The external item catalog client
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    request_repo: Arc<dyn RequestRepository>,
    reserve_repo: Arc<dyn ReserveRepository>,

    // Collaborators
    session_service: Arc<SessionService>,
    item_catalog: Arc<ItemCatalog>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        request_repo: Arc<dyn RequestRepository>,
        reserve_repo: Arc<dyn ReserveRepository>,
        session_service: Arc<SessionService>,
        item_catalog: Arc<ItemCatalog>,
    ) -> Self {
        Self {
            pool,
            request_repo,
            reserve_repo,
            session_service,
            item_catalog,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the request repository
    pub fn request_repo(&self) -> &dyn RequestRepository {
        self.request_repo.as_ref()
    }

    /// Get the reserve repository
    pub fn reserve_repo(&self) -> &dyn ReserveRepository {
        self.reserve_repo.as_ref()
    }

    /// Get the session service
    pub fn session_service(&self) -> &SessionService {
        self.session_service.as_ref()
    }

    /// Get the item catalog client
    pub fn item_catalog(&self) -> &ItemCatalog {
        self.item_catalog.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    request_repo: Option<Arc<dyn RequestRepository>>,
    reserve_repo: Option<Arc<dyn ReserveRepository>>,
    session_service: Option<Arc<SessionService>>,
    item_catalog: Option<Arc<ItemCatalog>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            request_repo: None,
            reserve_repo: None,
            session_service: None,
            item_catalog: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn request_repo(mut self, repo: Arc<dyn RequestRepository>) -> Self {
        self.request_repo = Some(repo);
        self
    }

    pub fn reserve_repo(mut self, repo: Arc<dyn ReserveRepository>) -> Self {
        self.reserve_repo = Some(repo);
        self
    }

    pub fn session_service(mut self, service: Arc<SessionService>) -> Self {
        self.session_service = Some(service);
        self
    }

    pub fn item_catalog(mut self, catalog: Arc<ItemCatalog>) -> Self {
        self.item_catalog = Some(catalog);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.request_repo
                .ok_or_else(|| super::error::ServiceError::validation("request_repo is required"))?,
            self.reserve_repo
                .ok_or_else(|| super::error::ServiceError::validation("reserve_repo is required"))?,
            self.session_service.ok_or_else(|| {
                super::error::ServiceError::validation("session_service is required")
            })?,
            self.item_catalog
                .ok_or_else(|| super::error::ServiceError::validation("item_catalog is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
