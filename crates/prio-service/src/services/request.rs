//! Request lifecycle service
//!
//! Owns submission and every moderation transition. Authorization is a pure
//! function of the explicit actor, the input, and the stored record: load,
//! authorize, mutate the entity, write back. Callers reload the collection
//! after a confirmed mutation instead of trusting a local patch.

use prio_core::entities::LootRequest;
use prio_core::traits::RequestFilter;
use prio_core::{validate_batch, vocab, Actor, CandidateItem, DomainError, Priority, RequestStatus};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::requests::MAX_RAID_BLOCKS;
use crate::dto::{
    DecideRequest, LootRequestResponse, OfficerEditRequest, PublicRequestResponse,
    SubmitBatchRequest, UpdateRequestFields,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reserve::ReserveService;

/// Request lifecycle service
pub struct RequestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RequestService<'a> {
    /// Create a new RequestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a batch of requests.
    ///
    /// The Conflict Validator runs over every row server-side; one rejection
    /// aborts the whole submission and nothing is persisted. Valid rows land
    /// as Pending, unlocked records in a single transaction.
    #[instrument(skip(self, request), fields(character = %request.character_name))]
    pub async fn submit_batch(
        &self,
        actor: &Actor,
        request: SubmitBatchRequest,
    ) -> ServiceResult<Vec<LootRequestResponse>> {
        let user_id = actor
            .user_id()
            .ok_or_else(|| ServiceError::permission_denied("submit requests"))?;
        let discord_name = actor
            .display_name()
            .unwrap_or("Unknown")
            .to_string();

        let character_name = request.character_name.trim().to_string();
        let class = request.class.trim().to_string();
        if character_name.is_empty() || class.is_empty() {
            return Err(ServiceError::validation(
                "Character name and class are required",
            ));
        }
        if !vocab::is_known_class(&class) {
            return Err(ServiceError::validation(format!("Unknown class: {class}")));
        }
        if request.raids.len() > MAX_RAID_BLOCKS {
            return Err(ServiceError::validation(format!(
                "At most {MAX_RAID_BLOCKS} raid blocks per submission"
            )));
        }

        // Flatten raid blocks into candidate rows; priority labels may come
        // in the form's suffixed spelling
        let mut candidates = Vec::new();
        for block in &request.raids {
            for row in &block.items {
                let priority = row
                    .priority
                    .parse::<Priority>()
                    .map_err(ServiceError::validation)?;
                // Blank rows fall through to the validator's skip rule; a
                // filled row with an unknown slot is a real mistake
                if !row.item_name.trim().is_empty()
                    && !row.slot.trim().is_empty()
                    && !vocab::is_known_slot(&row.slot)
                {
                    return Err(ServiceError::validation(format!(
                        "Unknown slot: {}",
                        row.slot
                    )));
                }
                candidates.push(CandidateItem {
                    raid: block.raid.clone(),
                    item_name: row.item_name.clone(),
                    slot: row.slot.clone(),
                    priority,
                    note: row.note.clone().filter(|n| !n.is_empty()),
                });
            }
        }

        // Re-check against the registry at submission time; client-visible
        // state may be stale
        let reserves = ReserveService::new(self.ctx).reserve_index().await?;
        let accepted = validate_batch(&candidates, actor, &reserves)?;

        let rows: Vec<LootRequest> = accepted
            .into_iter()
            .map(|item| {
                LootRequest::new(
                    Uuid::new_v4(),
                    user_id,
                    discord_name.clone(),
                    character_name.clone(),
                    class.clone(),
                    item.raid,
                    item.item_name,
                    item.slot,
                    item.priority,
                    item.note,
                )
            })
            .collect();

        self.ctx.request_repo().insert_batch(&rows).await?;

        info!(
            user_id = %user_id,
            count = rows.len(),
            "Loot request batch submitted"
        );

        Ok(rows.iter().map(LootRequestResponse::from).collect())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// List the acting member's own requests, newest first
    #[instrument(skip(self))]
    pub async fn list_mine(&self, actor: &Actor) -> ServiceResult<Vec<LootRequestResponse>> {
        let user_id = actor
            .user_id()
            .ok_or_else(|| ServiceError::permission_denied("list own requests"))?;

        let requests = self.ctx.request_repo().find_by_user(user_id).await?;
        Ok(requests.iter().map(LootRequestResponse::from).collect())
    }

    /// Officer review list with optional status/raid filters
    #[instrument(skip(self))]
    pub async fn list_for_review(
        &self,
        actor: &Actor,
        filter: RequestFilter,
    ) -> ServiceResult<Vec<LootRequestResponse>> {
        self.require_officer(actor, "review requests")?;

        let requests = self.ctx.request_repo().find_all(filter).await?;
        Ok(requests.iter().map(LootRequestResponse::from).collect())
    }

    /// Public priority overview: decided requests only, ordered by raid then
    /// item name. Open to anonymous readers.
    #[instrument(skip(self))]
    pub async fn list_decided(&self) -> ServiceResult<Vec<PublicRequestResponse>> {
        let requests = self.ctx.request_repo().find_decided().await?;
        Ok(requests.iter().map(PublicRequestResponse::from).collect())
    }

    // ========================================================================
    // Lifecycle transitions
    // ========================================================================

    /// Officer decision; requires an unlocked record
    #[instrument(skip(self))]
    pub async fn decide(
        &self,
        actor: &Actor,
        id: Uuid,
        request: DecideRequest,
    ) -> ServiceResult<LootRequestResponse> {
        self.require_officer(actor, "decide requests")?;
        let reviewer = actor.display_name().unwrap_or("Unknown").to_string();

        let verdict = request
            .verdict
            .parse::<RequestStatus>()
            .map_err(ServiceError::validation)?;

        let mut record = self.load(id).await?;
        record.decide(verdict, reviewer)?;
        self.ctx.request_repo().update(&record).await?;

        info!(id = %id, verdict = %verdict, "Request decided");

        Ok(LootRequestResponse::from(&record))
    }

    /// Owner resubmission of a decided, unlocked request: back to Pending,
    /// reviewer cleared, everything else untouched
    #[instrument(skip(self))]
    pub async fn resubmit(&self, actor: &Actor, id: Uuid) -> ServiceResult<LootRequestResponse> {
        let mut record = self.load(id).await?;
        self.require_owner(actor, &record)?;

        record.reopen()?;
        self.ctx.request_repo().update(&record).await?;

        info!(id = %id, "Request resubmitted for review");

        Ok(LootRequestResponse::from(&record))
    }

    /// Owner edit of priority/note on a decided, unlocked request
    #[instrument(skip(self, request))]
    pub async fn update_member_fields(
        &self,
        actor: &Actor,
        id: Uuid,
        request: UpdateRequestFields,
    ) -> ServiceResult<LootRequestResponse> {
        let mut record = self.load(id).await?;
        self.require_owner(actor, &record)?;

        if let Some(priority) = request.priority {
            let priority = priority
                .parse::<Priority>()
                .map_err(ServiceError::validation)?;
            record.set_priority(priority, actor)?;
        }

        if let Some(note) = request.user_note {
            let note = if note.is_empty() { None } else { Some(note) };
            record.set_user_note(note)?;
        }

        self.ctx.request_repo().update(&record).await?;

        Ok(LootRequestResponse::from(&record))
    }

    /// Officer edit of item name, raid, or admin note; any status, unlocked
    #[instrument(skip(self, request))]
    pub async fn update_officer_fields(
        &self,
        actor: &Actor,
        id: Uuid,
        request: OfficerEditRequest,
    ) -> ServiceResult<LootRequestResponse> {
        self.require_officer(actor, "edit requests")?;

        let mut record = self.load(id).await?;

        let admin_note = request
            .admin_note
            .map(|note| if note.is_empty() { None } else { Some(note) });
        record.set_officer_fields(request.item_name, request.raid, admin_note)?;

        self.ctx.request_repo().update(&record).await?;

        Ok(LootRequestResponse::from(&record))
    }

    /// Officer lock toggle; the only mutation permitted on a locked record
    #[instrument(skip(self))]
    pub async fn toggle_lock(&self, actor: &Actor, id: Uuid) -> ServiceResult<LootRequestResponse> {
        self.require_officer(actor, "lock requests")?;

        let mut record = self.load(id).await?;
        record.toggle_lock();
        self.ctx.request_repo().update(&record).await?;

        info!(id = %id, locked = record.locked, "Request lock toggled");

        Ok(LootRequestResponse::from(&record))
    }

    /// Officer delete; refused while locked, irreversible once it runs
    #[instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> ServiceResult<()> {
        self.require_officer(actor, "delete requests")?;

        let record = self.load(id).await?;
        if record.locked {
            return Err(DomainError::RecordLocked.into());
        }

        self.ctx.request_repo().delete(id).await?;

        info!(id = %id, "Request deleted");

        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn load(&self, id: Uuid) -> ServiceResult<LootRequest> {
        self.ctx
            .request_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Request", id.to_string()))
    }

    fn require_officer(&self, actor: &Actor, action: &str) -> ServiceResult<()> {
        if actor.is_officer() {
            Ok(())
        } else {
            Err(ServiceError::permission_denied(action))
        }
    }

    fn require_owner(&self, actor: &Actor, record: &LootRequest) -> ServiceResult<()> {
        if actor.owns(record.user_id) {
            Ok(())
        } else {
            Err(DomainError::NotRequestOwner.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::{test_context, InMemoryRequestRepo, InMemoryReserveRepo};
    use super::*;
    use crate::dto::{RaidBlock, SubmitItemRow};

    fn member() -> Actor {
        Actor::authenticated(Uuid::new_v4(), "Thrall", false)
    }

    fn officer() -> Actor {
        Actor::authenticated(Uuid::new_v4(), "Jaina", true)
    }

    fn submission(rows: Vec<SubmitItemRow>) -> SubmitBatchRequest {
        SubmitBatchRequest {
            character_name: "Thrall".to_string(),
            class: "Shaman".to_string(),
            raids: vec![RaidBlock {
                raid: "Molten Core".to_string(),
                items: rows,
            }],
        }
    }

    fn row(item: &str, slot: &str, priority: &str) -> SubmitItemRow {
        SubmitItemRow {
            item_name: item.to_string(),
            slot: slot.to_string(),
            priority: priority.to_string(),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_submit_reserved_item_creates_zero_records() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::with_items(["Ashkandi"]));
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let result = service
            .submit_batch(
                &member(),
                submission(vec![
                    row("Thunderfury", "Main Hand", "High"),
                    row("Ashkandi", "Main Hand", "High"),
                ]),
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Domain(DomainError::HardReserveConflict { ref item }) if item.as_str() == "Ashkandi"
        ));
        assert!(requests.all().is_empty());
    }

    #[tokio::test]
    async fn test_officer_submits_hr_priority() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let created = service
            .submit_batch(&officer(), submission(vec![row("Thunderfury", "Main Hand", "HR")]))
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].priority, "HR");
        assert_eq!(created[0].status, "pending");
        assert_eq!(requests.all().len(), 1);
    }

    #[tokio::test]
    async fn test_member_submitting_hr_is_rejected() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let result = service
            .submit_batch(&member(), submission(vec![row("Thunderfury", "Main Hand", "HR")]))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Domain(DomainError::InsufficientPrivilege)
        ));
        assert!(requests.all().is_empty());
    }

    #[tokio::test]
    async fn test_form_priority_labels_are_normalized() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let created = service
            .submit_batch(
                &member(),
                submission(vec![row("Thunderfury", "Main Hand", "High-SR")]),
            )
            .await
            .unwrap();

        assert_eq!(created[0].priority, "High");
    }

    #[tokio::test]
    async fn test_resubmit_approved_request() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let owner = member();
        service
            .submit_batch(&owner, submission(vec![row("Thunderfury", "Main Hand", "High")]))
            .await
            .unwrap();
        let id = requests.all()[0].id;

        service
            .decide(
                &officer(),
                id,
                DecideRequest {
                    verdict: "approved".to_string(),
                },
            )
            .await
            .unwrap();

        let resubmitted = service.resubmit(&owner, id).await.unwrap();
        assert_eq!(resubmitted.status, "pending");
        assert!(resubmitted.reviewed_by.is_none());
        assert_eq!(resubmitted.item_name, "Thunderfury");
    }

    #[tokio::test]
    async fn test_decide_on_locked_record_fails_and_stays_pending() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let reviewer = officer();
        service
            .submit_batch(&member(), submission(vec![row("Thunderfury", "Main Hand", "High")]))
            .await
            .unwrap();
        let id = requests.all()[0].id;

        service.toggle_lock(&reviewer, id).await.unwrap();

        let result = service
            .decide(
                &reviewer,
                id,
                DecideRequest {
                    verdict: "approved".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Domain(DomainError::RecordLocked)
        ));
        assert_eq!(requests.all()[0].status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_resubmit() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let owner = member();
        service
            .submit_batch(&owner, submission(vec![row("Thunderfury", "Main Hand", "High")]))
            .await
            .unwrap();
        let id = requests.all()[0].id;
        service
            .decide(
                &officer(),
                id,
                DecideRequest {
                    verdict: "rejected".to_string(),
                },
            )
            .await
            .unwrap();

        let stranger = member();
        assert!(matches!(
            service.resubmit(&stranger, id).await.unwrap_err(),
            ServiceError::Domain(DomainError::NotRequestOwner)
        ));
    }

    #[tokio::test]
    async fn test_delete_refused_while_locked() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let reviewer = officer();
        service
            .submit_batch(&member(), submission(vec![row("Thunderfury", "Main Hand", "High")]))
            .await
            .unwrap();
        let id = requests.all()[0].id;
        service.toggle_lock(&reviewer, id).await.unwrap();

        assert!(matches!(
            service.delete(&reviewer, id).await.unwrap_err(),
            ServiceError::Domain(DomainError::RecordLocked)
        ));
        assert_eq!(requests.all().len(), 1);

        service.toggle_lock(&reviewer, id).await.unwrap();
        service.delete(&reviewer, id).await.unwrap();
        assert!(requests.all().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_cannot_submit() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let result = service
            .submit_batch(
                &Actor::Anonymous,
                submission(vec![row("Thunderfury", "Main Hand", "High")]),
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::PermissionDenied { .. }
        ));
    }

    #[tokio::test]
    async fn test_member_tunes_priority_after_decision() {
        let requests = Arc::new(InMemoryRequestRepo::default());
        let reserves = Arc::new(InMemoryReserveRepo::default());
        let ctx = test_context(requests.clone(), reserves);
        let service = RequestService::new(&ctx);

        let owner = member();
        service
            .submit_batch(&owner, submission(vec![row("Thunderfury", "Main Hand", "Medium")]))
            .await
            .unwrap();
        let id = requests.all()[0].id;

        // Still pending: member edits are refused
        let early = service
            .update_member_fields(
                &owner,
                id,
                UpdateRequestFields {
                    priority: Some("High".to_string()),
                    user_note: None,
                },
            )
            .await;
        assert!(matches!(
            early.unwrap_err(),
            ServiceError::Domain(DomainError::NotEditable)
        ));

        service
            .decide(
                &officer(),
                id,
                DecideRequest {
                    verdict: "rejected".to_string(),
                },
            )
            .await
            .unwrap();

        let updated = service
            .update_member_fields(
                &owner,
                id,
                UpdateRequestFields {
                    priority: Some("High".to_string()),
                    user_note: Some("second try".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.priority, "High");
        assert_eq!(updated.user_note.as_deref(), Some("second try"));
    }
}
