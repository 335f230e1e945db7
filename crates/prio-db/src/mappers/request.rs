//! Loot request entity <-> model mapper

use prio_core::entities::LootRequest;
use prio_core::error::DomainError;
use prio_core::value_objects::{Priority, RequestStatus};

use crate::models::LootRequestModel;

/// Convert LootRequestModel to LootRequest entity.
///
/// Fallible: the priority/status columns are text and a row written by an
/// incompatible schema version surfaces as a database error rather than a
/// panic.
impl TryFrom<LootRequestModel> for LootRequest {
    type Error = DomainError;

    fn try_from(model: LootRequestModel) -> Result<Self, Self::Error> {
        let priority = model
            .priority
            .parse::<Priority>()
            .map_err(DomainError::DatabaseError)?;
        let status = model
            .status
            .parse::<RequestStatus>()
            .map_err(DomainError::DatabaseError)?;

        Ok(LootRequest {
            id: model.id,
            user_id: model.user_id,
            discord_name: model.discord_name,
            character_name: model.character_name,
            class: model.class,
            raid: model.raid,
            item_name: model.item_name,
            slot: model.slot,
            priority,
            user_note: model.user_note,
            admin_note: model.admin_note,
            status,
            reviewed_by: model.reviewed_by,
            locked: model.locked,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn model() -> LootRequestModel {
        LootRequestModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            discord_name: "thrall#0001".to_string(),
            character_name: "Thrall".to_string(),
            class: "Shaman".to_string(),
            raid: "Molten Core".to_string(),
            item_name: "Ashkandi".to_string(),
            slot: "Main Hand".to_string(),
            priority: "High".to_string(),
            user_note: None,
            admin_note: None,
            status: "pending".to_string(),
            reviewed_by: None,
            locked: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let entity: LootRequest = model().try_into().unwrap();
        assert_eq!(entity.priority, Priority::High);
        assert_eq!(entity.status, RequestStatus::Pending);
    }

    #[test]
    fn test_bad_priority_column_is_a_database_error() {
        let mut m = model();
        m.priority = "Legendary".to_string();
        let err = LootRequest::try_from(m).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
