//! Loot request entity - one member's desire for one item in one raid

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{Actor, Priority, RequestStatus};

/// Loot request entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub discord_name: String,
    pub character_name: String,
    pub class: String,
    pub raid: String,
    pub item_name: String,
    pub slot: String,
    pub priority: Priority,
    pub user_note: Option<String>,
    pub admin_note: Option<String>,
    pub status: RequestStatus,
    pub reviewed_by: Option<String>,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

impl LootRequest {
    /// Create a new pending, unlocked request
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        discord_name: String,
        character_name: String,
        class: String,
        raid: String,
        item_name: String,
        slot: String,
        priority: Priority,
        user_note: Option<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            discord_name,
            character_name,
            class,
            raid,
            item_name,
            slot,
            priority,
            user_note,
            admin_note: None,
            status: RequestStatus::Pending,
            reviewed_by: None,
            locked: false,
            created_at: Utc::now(),
        }
    }

    /// Whether the owning member may currently tune priority/note.
    ///
    /// Members edit only after a decision has been rendered; a still-pending
    /// request is untouchable until the officer rules on it.
    #[must_use]
    pub fn member_editable(&self) -> bool {
        !self.locked && self.status.is_decided()
    }

    /// Record an officer decision. Requires an unlocked record; sets status
    /// and reviewer, nothing else.
    pub fn decide(
        &mut self,
        verdict: RequestStatus,
        reviewer: impl Into<String>,
    ) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::RecordLocked);
        }
        if !verdict.is_decided() {
            return Err(DomainError::ValidationError(
                "Decision must be approved or rejected".to_string(),
            ));
        }
        self.status = verdict;
        self.reviewed_by = Some(reviewer.into());
        Ok(())
    }

    /// Put a decided request back in the review queue: status returns to
    /// Pending and the reviewer is cleared, every other field untouched.
    pub fn reopen(&mut self) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::RecordLocked);
        }
        if !self.status.is_decided() {
            return Err(DomainError::NotResubmittable);
        }
        self.status = RequestStatus::Pending;
        self.reviewed_by = None;
        Ok(())
    }

    /// Member edit of the free-text note
    pub fn set_user_note(&mut self, note: Option<String>) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::RecordLocked);
        }
        if !self.status.is_decided() {
            return Err(DomainError::NotEditable);
        }
        self.user_note = note;
        Ok(())
    }

    /// Member edit of the priority tag. Raising to HR re-checks the officer
    /// privilege, same rule as at submission.
    pub fn set_priority(&mut self, priority: Priority, actor: &Actor) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::RecordLocked);
        }
        if !self.status.is_decided() {
            return Err(DomainError::NotEditable);
        }
        if priority.requires_officer() && !actor.is_officer() {
            return Err(DomainError::InsufficientPrivilege);
        }
        self.priority = priority;
        Ok(())
    }

    /// Officer edit of item name, raid, or admin note (any status, unlocked)
    pub fn set_officer_fields(
        &mut self,
        item_name: Option<String>,
        raid: Option<String>,
        admin_note: Option<Option<String>>,
    ) -> Result<(), DomainError> {
        if self.locked {
            return Err(DomainError::RecordLocked);
        }
        if let Some(item_name) = item_name {
            self.item_name = item_name;
        }
        if let Some(raid) = raid {
            self.raid = raid;
        }
        if let Some(admin_note) = admin_note {
            self.admin_note = admin_note;
        }
        Ok(())
    }

    /// Flip the lock flag. This is the only mutation permitted on a locked
    /// record (the unlock path).
    pub fn toggle_lock(&mut self) {
        self.locked = !self.locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LootRequest {
        LootRequest::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "thrall#0001".to_string(),
            "Thrall".to_string(),
            "Shaman".to_string(),
            "Molten Core".to_string(),
            "Ashkandi".to_string(),
            "Main Hand".to_string(),
            Priority::High,
            None,
        )
    }

    #[test]
    fn test_new_request_is_pending_and_unlocked() {
        let req = sample();
        assert_eq!(req.status, RequestStatus::Pending);
        assert!(!req.locked);
        assert!(req.reviewed_by.is_none());
    }

    #[test]
    fn test_decide_sets_status_and_reviewer() {
        let mut req = sample();
        req.decide(RequestStatus::Approved, "Jaina").unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.reviewed_by.as_deref(), Some("Jaina"));
    }

    #[test]
    fn test_decide_rejects_pending_verdict() {
        let mut req = sample();
        assert!(req.decide(RequestStatus::Pending, "Jaina").is_err());
    }

    #[test]
    fn test_decide_fails_when_locked() {
        let mut req = sample();
        req.toggle_lock();
        let err = req.decide(RequestStatus::Approved, "Jaina").unwrap_err();
        assert!(matches!(err, DomainError::RecordLocked));
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[test]
    fn test_reopen_clears_reviewer_only() {
        let mut req = sample();
        req.user_note = Some("please".to_string());
        req.decide(RequestStatus::Approved, "Jaina").unwrap();
        req.reopen().unwrap();
        assert_eq!(req.status, RequestStatus::Pending);
        assert!(req.reviewed_by.is_none());
        assert_eq!(req.user_note.as_deref(), Some("please"));
        assert_eq!(req.priority, Priority::High);
    }

    #[test]
    fn test_reopen_requires_decided_status() {
        let mut req = sample();
        assert!(matches!(
            req.reopen().unwrap_err(),
            DomainError::NotResubmittable
        ));
    }

    #[test]
    fn test_member_edits_gated_on_decision() {
        let mut req = sample();
        assert!(matches!(
            req.set_user_note(Some("x".to_string())).unwrap_err(),
            DomainError::NotEditable
        ));

        req.decide(RequestStatus::Rejected, "Jaina").unwrap();
        req.set_user_note(Some("reconsider?".to_string())).unwrap();
        assert_eq!(req.user_note.as_deref(), Some("reconsider?"));
    }

    #[test]
    fn test_member_cannot_raise_to_hr() {
        let mut req = sample();
        req.decide(RequestStatus::Rejected, "Jaina").unwrap();

        let member = Actor::authenticated(req.user_id, "Thrall", false);
        assert!(matches!(
            req.set_priority(Priority::Hr, &member).unwrap_err(),
            DomainError::InsufficientPrivilege
        ));

        let officer = Actor::authenticated(req.user_id, "Thrall", true);
        req.set_priority(Priority::Hr, &officer).unwrap();
        assert_eq!(req.priority, Priority::Hr);
    }

    #[test]
    fn test_toggle_lock_is_idempotent_inverse() {
        let mut req = sample();
        req.toggle_lock();
        assert!(req.locked);
        req.toggle_lock();
        assert!(!req.locked);
    }

    #[test]
    fn test_officer_fields_fail_when_locked() {
        let mut req = sample();
        req.toggle_lock();
        let err = req
            .set_officer_fields(None, None, Some(Some("note".to_string())))
            .unwrap_err();
        assert!(matches!(err, DomainError::RecordLocked));
        assert!(req.admin_note.is_none());
    }
}
