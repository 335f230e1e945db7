//! Presence entry - one connected member, ephemeral

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A currently connected member as shown on the roster.
///
/// Exists only for the duration of an active connection; multiple
/// connections for the same user id collapse to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceEntry {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar: Option<String>,
    pub is_officer: bool,
}

impl PresenceEntry {
    pub fn new(
        user_id: Uuid,
        display_name: impl Into<String>,
        avatar: Option<String>,
        is_officer: bool,
    ) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            avatar,
            is_officer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_entry_serde_roundtrip() {
        let entry = PresenceEntry::new(Uuid::new_v4(), "Thrall", None, true);
        let json = serde_json::to_string(&entry).unwrap();
        let back: PresenceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
