//! Hard reserve entity - an item globally withheld from normal requests

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Normalize an item name for identity/conflict comparison:
/// surrounding whitespace trimmed, case folded.
#[must_use]
pub fn normalize_item_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Hard reserve entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardReserveEntry {
    pub id: Uuid,
    pub item_name: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HardReserveEntry {
    /// Create a new entry. The display name keeps the caller's casing but is
    /// trimmed; identity uses the normalized form.
    pub fn new(id: Uuid, item_name: &str, note: Option<String>) -> Self {
        Self {
            id,
            item_name: item_name.trim().to_string(),
            note,
            created_at: Utc::now(),
        }
    }

    /// Normalized identity key for this entry
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_item_name(&self.item_name)
    }

    /// Whether a candidate item name matches this reserve
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.normalized_name() == normalize_item_name(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_folds() {
        assert_eq!(normalize_item_name("  Ashkandi "), "ashkandi");
        assert_eq!(normalize_item_name("ASHKANDI"), "ashkandi");
    }

    #[test]
    fn test_entry_matches_case_insensitively() {
        let entry = HardReserveEntry::new(Uuid::new_v4(), "Ashkandi", None);
        assert!(entry.matches("ashkandi"));
        assert!(entry.matches("  ASHKANDI  "));
        assert!(!entry.matches("Thunderfury"));
    }

    #[test]
    fn test_new_trims_display_name() {
        let entry = HardReserveEntry::new(Uuid::new_v4(), "  Ashkandi ", None);
        assert_eq!(entry.item_name, "Ashkandi");
    }
}
