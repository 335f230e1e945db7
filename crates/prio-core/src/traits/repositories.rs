//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Storage is treated as a remote call with no
//! cross-record transactional guarantee except where a method says so.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{HardReserveEntry, LootRequest};
use crate::error::DomainError;
use crate::value_objects::RequestStatus;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Request Repository
// ============================================================================

/// Filter options for request queries
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub raid: Option<String>,
}

#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Find request by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<LootRequest>>;

    /// List a member's own requests, newest first
    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<LootRequest>>;

    /// List all requests with optional filters, newest first
    async fn find_all(&self, filter: RequestFilter) -> RepoResult<Vec<LootRequest>>;

    /// List decided (approved/rejected) requests ordered by raid then item
    /// name - the public overview
    async fn find_decided(&self) -> RepoResult<Vec<LootRequest>>;

    /// Insert a whole submission in one transaction; either every row lands
    /// or none do
    async fn insert_batch(&self, requests: &[LootRequest]) -> RepoResult<()>;

    /// Write back a mutated request (all mutable columns)
    async fn update(&self, request: &LootRequest) -> RepoResult<()>;

    /// Permanently remove a request
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Reserve Repository
// ============================================================================

#[async_trait]
pub trait ReserveRepository: Send + Sync {
    /// Find entry by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<HardReserveEntry>>;

    /// List all entries, newest first
    async fn find_all(&self) -> RepoResult<Vec<HardReserveEntry>>;

    /// Check whether a normalized item name is already reserved
    async fn exists_by_name(&self, normalized_name: &str) -> RepoResult<bool>;

    /// Create a new entry
    async fn create(&self, entry: &HardReserveEntry) -> RepoResult<()>;

    /// Update an existing entry
    async fn update(&self, entry: &HardReserveEntry) -> RepoResult<()>;

    /// Permanently remove an entry
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}
