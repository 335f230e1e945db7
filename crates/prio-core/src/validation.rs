//! Conflict Validator
//!
//! Pure submission-time validation: every candidate row is checked against
//! the hard-reserve blocklist and the actor's role before anything is
//! persisted. Runs server-side on every submission regardless of what the
//! client pre-checked.

use std::collections::HashSet;

use crate::entities::{normalize_item_name, HardReserveEntry};
use crate::error::DomainError;
use crate::value_objects::{Actor, Priority};

/// Normalized set of hard-reserved item names, rebuilt from the registry
/// for each submission.
#[derive(Debug, Clone, Default)]
pub struct ReserveIndex {
    names: HashSet<String>,
}

impl ReserveIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from registry entries
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a HardReserveEntry>) -> Self {
        Self {
            names: entries
                .into_iter()
                .map(HardReserveEntry::normalized_name)
                .collect(),
        }
    }

    /// Build the index from raw item names
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|n| normalize_item_name(n.as_ref()))
                .collect(),
        }
    }

    /// Whether the (trimmed, case-folded) item name is reserved
    #[must_use]
    pub fn contains(&self, item_name: &str) -> bool {
        self.names.contains(&normalize_item_name(item_name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One raw row from the submission form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    pub raid: String,
    pub item_name: String,
    pub slot: String,
    pub priority: Priority,
    pub note: Option<String>,
}

/// Outcome of validating a single candidate row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemVerdict {
    /// Row passes; carries the trimmed item name to persist
    Accepted { item_name: String },
    /// Empty row (blank item or slot) - dropped without error
    Skipped,
}

/// Validate a single candidate row.
///
/// Rules in order, first failure wins:
/// 1. blank item name or slot (post-trim) -> `Skipped`
/// 2. item name on the hard-reserve list -> `HardReserveConflict`
/// 3. HR priority from a non-officer -> `InsufficientPrivilege`
pub fn validate_item(
    candidate: &CandidateItem,
    actor: &Actor,
    reserves: &ReserveIndex,
) -> Result<ItemVerdict, DomainError> {
    let item_name = candidate.item_name.trim();
    if item_name.is_empty() || candidate.slot.trim().is_empty() {
        return Ok(ItemVerdict::Skipped);
    }

    if reserves.contains(item_name) {
        return Err(DomainError::HardReserveConflict {
            item: item_name.to_string(),
        });
    }

    if candidate.priority.requires_officer() && !actor.is_officer() {
        return Err(DomainError::InsufficientPrivilege);
    }

    Ok(ItemVerdict::Accepted {
        item_name: item_name.to_string(),
    })
}

/// Validate a whole submission batch.
///
/// A single rejection aborts the entire batch (no partial inserts); rows
/// that skip are dropped silently; a batch whose rows all skip is an
/// `EmptyBatch` error. Returns the accepted rows with trimmed item names.
pub fn validate_batch(
    candidates: &[CandidateItem],
    actor: &Actor,
    reserves: &ReserveIndex,
) -> Result<Vec<CandidateItem>, DomainError> {
    let mut accepted = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match validate_item(candidate, actor, reserves)? {
            ItemVerdict::Accepted { item_name } => {
                let mut row = candidate.clone();
                row.item_name = item_name;
                accepted.push(row);
            }
            ItemVerdict::Skipped => {}
        }
    }

    if accepted.is_empty() {
        return Err(DomainError::EmptyBatch);
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn member() -> Actor {
        Actor::authenticated(Uuid::new_v4(), "Thrall", false)
    }

    fn officer() -> Actor {
        Actor::authenticated(Uuid::new_v4(), "Jaina", true)
    }

    fn row(item: &str, slot: &str, priority: Priority) -> CandidateItem {
        CandidateItem {
            raid: "Molten Core".to_string(),
            item_name: item.to_string(),
            slot: slot.to_string(),
            priority,
            note: None,
        }
    }

    #[test]
    fn test_blank_rows_skip() {
        let reserves = ReserveIndex::new();
        let verdict = validate_item(&row("   ", "Main Hand", Priority::High), &member(), &reserves)
            .unwrap();
        assert_eq!(verdict, ItemVerdict::Skipped);

        let verdict =
            validate_item(&row("Ashkandi", "", Priority::High), &member(), &reserves).unwrap();
        assert_eq!(verdict, ItemVerdict::Skipped);
    }

    #[test]
    fn test_hard_reserve_conflict_ignores_casing_and_whitespace() {
        let reserves = ReserveIndex::from_names(["Ashkandi"]);

        for variant in ["ashkandi", "ASHKANDI", "  Ashkandi "] {
            let err = validate_item(&row(variant, "Main Hand", Priority::High), &member(), &reserves)
                .unwrap_err();
            assert!(matches!(err, DomainError::HardReserveConflict { ref item } if item.trim() == variant.trim()));
        }
    }

    #[test]
    fn test_hr_priority_gated_on_officer() {
        let reserves = ReserveIndex::new();

        let err = validate_item(&row("Thunderfury", "Main Hand", Priority::Hr), &member(), &reserves)
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientPrivilege));

        let verdict =
            validate_item(&row("Thunderfury", "Main Hand", Priority::Hr), &officer(), &reserves)
                .unwrap();
        assert!(matches!(verdict, ItemVerdict::Accepted { .. }));
    }

    #[test]
    fn test_reserve_rule_fires_before_privilege_rule() {
        // Reserve conflict wins even when the privilege rule would also fail
        let reserves = ReserveIndex::from_names(["Ashkandi"]);
        let err = validate_item(&row("Ashkandi", "Main Hand", Priority::Hr), &member(), &reserves)
            .unwrap_err();
        assert!(matches!(err, DomainError::HardReserveConflict { .. }));
    }

    #[test]
    fn test_batch_single_conflict_aborts_everything() {
        let reserves = ReserveIndex::from_names(["Ashkandi"]);
        let batch = vec![
            row("Thunderfury", "Main Hand", Priority::High),
            row("Ashkandi", "Main Hand", Priority::High),
        ];

        let err = validate_batch(&batch, &member(), &reserves).unwrap_err();
        assert!(
            matches!(err, DomainError::HardReserveConflict { ref item } if item.as_str() == "Ashkandi")
        );
    }

    #[test]
    fn test_batch_drops_blank_rows() {
        let reserves = ReserveIndex::new();
        let batch = vec![
            row("", "Main Hand", Priority::High),
            row("Thunderfury", "Main Hand", Priority::Medium),
            row("   ", "", Priority::Low),
        ];

        let accepted = validate_batch(&batch, &member(), &reserves).unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].item_name, "Thunderfury");
    }

    #[test]
    fn test_batch_of_only_blank_rows_is_an_error() {
        let reserves = ReserveIndex::new();
        let batch = vec![row("", "", Priority::Low)];
        assert!(matches!(
            validate_batch(&batch, &member(), &reserves).unwrap_err(),
            DomainError::EmptyBatch
        ));
    }

    #[test]
    fn test_accepted_rows_carry_trimmed_names() {
        let reserves = ReserveIndex::new();
        let batch = vec![row("  Thunderfury ", "Main Hand", Priority::High)];
        let accepted = validate_batch(&batch, &member(), &reserves).unwrap();
        assert_eq!(accepted[0].item_name, "Thunderfury");
    }
}
