//! Hard reserve service
//!
//! CRUD over the hard-reserve registry plus the normalized index the
//! Conflict Validator checks on every submission. Listing is open to all
//! roles; every mutation requires an officer.

use prio_core::entities::{normalize_item_name, HardReserveEntry};
use prio_core::{Actor, ReserveIndex};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{ReserveCreateRequest, ReserveResponse, ReserveUpdateRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Hard reserve service
pub struct ReserveService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReserveService<'a> {
    /// Create a new ReserveService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all reserve entries, newest first. Open to every role; the
    /// client uses it for inline warnings, enforcement stays server-side.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<ReserveResponse>> {
        let entries = self.ctx.reserve_repo().find_all().await?;
        Ok(entries.iter().map(ReserveResponse::from).collect())
    }

    /// Build the normalized conflict index for submission validation
    #[instrument(skip(self))]
    pub async fn reserve_index(&self) -> ServiceResult<ReserveIndex> {
        let entries = self.ctx.reserve_repo().find_all().await?;
        Ok(ReserveIndex::from_entries(&entries))
    }

    /// Add an entry (officer only)
    #[instrument(skip(self, request), fields(item = %request.item_name))]
    pub async fn add(
        &self,
        actor: &Actor,
        request: ReserveCreateRequest,
    ) -> ServiceResult<ReserveResponse> {
        self.require_officer(actor)?;

        let item_name = request.item_name.trim();
        if item_name.is_empty() {
            return Err(ServiceError::validation("Item name must not be blank"));
        }

        // Pre-check for a friendlier error; the unique index is authoritative
        if self
            .ctx
            .reserve_repo()
            .exists_by_name(&normalize_item_name(item_name))
            .await?
        {
            return Err(ServiceError::conflict(format!(
                "\"{item_name}\" is already hard reserved"
            )));
        }

        let entry = HardReserveEntry::new(Uuid::new_v4(), item_name, request.note);
        self.ctx.reserve_repo().create(&entry).await?;

        info!(id = %entry.id, item = %entry.item_name, "Hard reserve added");

        Ok(ReserveResponse::from(&entry))
    }

    /// Update an entry (officer only)
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        request: ReserveUpdateRequest,
    ) -> ServiceResult<ReserveResponse> {
        self.require_officer(actor)?;

        let mut entry = self
            .ctx
            .reserve_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Reserve", id.to_string()))?;

        if let Some(item_name) = request.item_name {
            let item_name = item_name.trim().to_string();
            if item_name.is_empty() {
                return Err(ServiceError::validation("Item name must not be blank"));
            }
            entry.item_name = item_name;
        }

        if let Some(note) = request.note {
            entry.note = if note.is_empty() { None } else { Some(note) };
        }

        self.ctx.reserve_repo().update(&entry).await?;

        info!(id = %entry.id, item = %entry.item_name, "Hard reserve updated");

        Ok(ReserveResponse::from(&entry))
    }

    /// Remove an entry (officer only)
    #[instrument(skip(self))]
    pub async fn remove(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        self.require_officer(actor)?;

        self.ctx.reserve_repo().delete(id).await?;

        info!(id = %id, "Hard reserve removed");

        Ok(())
    }

    fn require_officer(&self, actor: &Actor) -> ServiceResult<()> {
        if actor.is_officer() {
            Ok(())
        } else {
            Err(ServiceError::permission_denied("manage hard reserves"))
        }
    }
}
