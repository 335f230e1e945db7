//! Live roster of connected members
//!
//! The authoritative roster lives in this process: a map keyed by user id
//! with a per-user connection count, so a member with two tabs open stays on
//! the roster until the last one closes. Every change is broadcast as a
//! [`RosterEvent`]; [`RosterView`] is the pure reducer that folds the event
//! stream back into the member set on the consuming side.

use std::collections::HashMap;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use prio_core::PresenceEntry;

/// Default broadcast buffer size
const EVENT_BUFFER: usize = 256;

/// A roster change, as delivered to every connected client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEvent {
    /// Full current member set; sent to a client right after it identifies
    Snapshot { members: Vec<PresenceEntry> },
    /// A member joined, or re-announced with a fresh payload (last wins)
    Joined { member: PresenceEntry },
    /// A member's last connection closed
    Left { user_id: Uuid },
}

/// Authoritative in-process roster
pub struct Roster {
    entries: DashMap<Uuid, (PresenceEntry, usize)>,
    tx: broadcast::Sender<RosterEvent>,
}

impl Roster {
    /// Create an empty roster
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            entries: DashMap::new(),
            tx,
        }
    }

    /// Subscribe to roster events
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.tx.subscribe()
    }

    /// Current member set (one entry per user id)
    #[must_use]
    pub fn snapshot(&self) -> Vec<PresenceEntry> {
        let mut members: Vec<PresenceEntry> =
            self.entries.iter().map(|e| e.value().0.clone()).collect();
        members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        members
    }

    /// Number of distinct members online
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new connection announced this member. Entries collapse per user id
    /// with the latest payload winning; the connection count goes up by one.
    pub fn join(&self, member: PresenceEntry) {
        let user_id = member.user_id;
        self.entries
            .entry(user_id)
            .and_modify(|(entry, count)| {
                *entry = member.clone();
                *count += 1;
            })
            .or_insert_with(|| (member.clone(), 1));

        tracing::debug!(user_id = %user_id, "Member announced on roster");
        let _ = self.tx.send(RosterEvent::Joined { member });
    }

    /// An already-joined connection re-announced with a fresh payload; the
    /// connection count is unchanged.
    pub fn refresh(&self, member: PresenceEntry) {
        if let Some(mut slot) = self.entries.get_mut(&member.user_id) {
            slot.0 = member.clone();
            let _ = self.tx.send(RosterEvent::Joined { member });
        }
    }

    /// A connection for this member closed. The member leaves the roster
    /// only when the last connection is gone.
    pub fn leave(&self, user_id: Uuid) {
        let gone = match self.entries.get_mut(&user_id) {
            Some(mut slot) => {
                slot.1 = slot.1.saturating_sub(1);
                slot.1 == 0
            }
            None => false,
        };

        if gone {
            self.entries.remove(&user_id);
            tracing::debug!(user_id = %user_id, "Member left roster");
            let _ = self.tx.send(RosterEvent::Left { user_id });
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure reducer folding roster events into a member set.
///
/// Consumers (dashboards, tests) apply every received event in order; the
/// result is the deduplicated set of currently-announced members.
#[derive(Debug, Clone, Default)]
pub struct RosterView {
    members: HashMap<Uuid, PresenceEntry>,
}

impl RosterView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the view
    pub fn apply(&mut self, event: RosterEvent) {
        match event {
            RosterEvent::Snapshot { members } => {
                self.members = members.into_iter().map(|m| (m.user_id, m)).collect();
            }
            RosterEvent::Joined { member } => {
                self.members.insert(member.user_id, member);
            }
            RosterEvent::Left { user_id } => {
                self.members.remove(&user_id);
            }
        }
    }

    /// Current members, sorted by display name for stable rendering
    #[must_use]
    pub fn members(&self) -> Vec<&PresenceEntry> {
        let mut members: Vec<&PresenceEntry> = self.members.values().collect();
        members.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PresenceEntry {
        PresenceEntry::new(Uuid::new_v4(), name, None, false)
    }

    #[test]
    fn test_join_and_snapshot() {
        let roster = Roster::new();
        roster.join(entry("Thrall"));
        roster.join(entry("Jaina"));

        let snapshot = roster.snapshot();
        assert_eq!(snapshot.len(), 2);
        // Sorted by display name
        assert_eq!(snapshot[0].display_name, "Jaina");
        assert_eq!(snapshot[1].display_name, "Thrall");
    }

    #[test]
    fn test_duplicate_connections_collapse_to_one_entry() {
        let roster = Roster::new();
        let member = entry("Thrall");

        roster.join(member.clone());
        roster.join(member.clone());
        assert_eq!(roster.len(), 1);

        // First tab closes; still online
        roster.leave(member.user_id);
        assert_eq!(roster.len(), 1);

        // Last tab closes; gone
        roster.leave(member.user_id);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_last_announcement_wins() {
        let roster = Roster::new();
        let user_id = Uuid::new_v4();

        roster.join(PresenceEntry::new(user_id, "Thrall", None, false));
        roster.join(PresenceEntry::new(
            user_id,
            "Thrall",
            Some("https://cdn/new.png".to_string()),
            true,
        ));

        let snapshot = roster.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].avatar.as_deref(), Some("https://cdn/new.png"));
        assert!(snapshot[0].is_officer);
    }

    #[test]
    fn test_leave_unknown_user_is_a_no_op() {
        let roster = Roster::new();
        roster.leave(Uuid::new_v4());
        assert!(roster.is_empty());
    }

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let roster = Roster::new();
        let mut rx = roster.subscribe();

        let member = entry("Thrall");
        roster.join(member.clone());

        match rx.recv().await.unwrap() {
            RosterEvent::Joined { member: got } => assert_eq!(got, member),
            other => panic!("unexpected event: {other:?}"),
        }

        roster.leave(member.user_id);
        match rx.recv().await.unwrap() {
            RosterEvent::Left { user_id } => assert_eq!(user_id, member.user_id),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_view_folds_event_stream() {
        let mut view = RosterView::new();
        let a = entry("Thrall");
        let b = entry("Jaina");

        view.apply(RosterEvent::Snapshot {
            members: vec![a.clone()],
        });
        assert_eq!(view.len(), 1);

        view.apply(RosterEvent::Joined { member: b.clone() });
        assert_eq!(view.len(), 2);

        // Re-join with a new payload replaces, not duplicates
        let mut a2 = a.clone();
        a2.is_officer = true;
        view.apply(RosterEvent::Joined { member: a2 });
        assert_eq!(view.len(), 2);
        assert!(view
            .members()
            .iter()
            .find(|m| m.user_id == a.user_id)
            .unwrap()
            .is_officer);

        view.apply(RosterEvent::Left { user_id: b.user_id });
        assert_eq!(view.len(), 1);

        view.apply(RosterEvent::Left { user_id: a.user_id });
        assert!(view.is_empty());
    }

    #[test]
    fn test_snapshot_replaces_stale_view_state() {
        let mut view = RosterView::new();
        view.apply(RosterEvent::Joined { member: entry("Stale") });

        view.apply(RosterEvent::Snapshot { members: vec![] });
        assert!(view.is_empty());
    }
}
