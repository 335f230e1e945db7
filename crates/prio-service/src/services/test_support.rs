//! In-memory repository implementations for service tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use prio_common::SessionService;
use prio_core::entities::{normalize_item_name, HardReserveEntry, LootRequest};
use prio_core::traits::{RepoResult, RequestFilter, RequestRepository, ReserveRepository};
use prio_core::DomainError;

use super::context::ServiceContext;
use super::item_catalog::ItemCatalog;

/// In-memory RequestRepository
#[derive(Default)]
pub struct InMemoryRequestRepo {
    rows: Mutex<Vec<LootRequest>>,
}

impl InMemoryRequestRepo {
    pub fn all(&self) -> Vec<LootRequest> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<LootRequest>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> RepoResult<Vec<LootRequest>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_all(&self, filter: RequestFilter) -> RepoResult<Vec<LootRequest>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.status.is_none_or(|s| r.status == s))
            .filter(|r| filter.raid.as_ref().is_none_or(|raid| &r.raid == raid))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_decided(&self) -> RepoResult<Vec<LootRequest>> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status.is_decided())
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.raid.cmp(&b.raid).then(a.item_name.cmp(&b.item_name)));
        Ok(rows)
    }

    async fn insert_batch(&self, requests: &[LootRequest]) -> RepoResult<()> {
        self.rows.lock().unwrap().extend_from_slice(requests);
        Ok(())
    }

    async fn update(&self, request: &LootRequest) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id == request.id)
            .ok_or(DomainError::RequestNotFound(request.id))?;
        *slot = request.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(DomainError::RequestNotFound(id));
        }
        Ok(())
    }
}

/// In-memory ReserveRepository
#[derive(Default)]
pub struct InMemoryReserveRepo {
    rows: Mutex<Vec<HardReserveEntry>>,
}

impl InMemoryReserveRepo {
    pub fn with_items<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Self {
        let rows = items
            .into_iter()
            .map(|name| HardReserveEntry::new(Uuid::new_v4(), name.as_ref(), None))
            .collect();
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait]
impl ReserveRepository for InMemoryReserveRepo {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<HardReserveEntry>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> RepoResult<Vec<HardReserveEntry>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn exists_by_name(&self, normalized_name: &str) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.normalized_name() == normalized_name))
    }

    async fn create(&self, entry: &HardReserveEntry) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.normalized_name() == normalize_item_name(&entry.item_name))
        {
            return Err(DomainError::ReserveAlreadyExists {
                item: entry.item_name.clone(),
            });
        }
        rows.push(entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &HardReserveEntry) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id == entry.id)
            .ok_or(DomainError::ReserveNotFound(entry.id))?;
        *slot = entry.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(DomainError::ReserveNotFound(id));
        }
        Ok(())
    }
}

/// Build a ServiceContext over the in-memory repositories. The pool is lazy
/// and never connects; nothing in these tests touches it.
pub fn test_context(
    request_repo: Arc<InMemoryRequestRepo>,
    reserve_repo: Arc<InMemoryReserveRepo>,
) -> ServiceContext {
    let pool = prio_db::PgPool::connect_lazy("postgresql://localhost/prio_test")
        .expect("lazy pool");
    let session_service = Arc::new(SessionService::new("test-secret", 3600));
    let item_catalog =
        Arc::new(ItemCatalog::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap());

    ServiceContext::new(pool, request_repo, reserve_repo, session_service, item_catalog)
}
