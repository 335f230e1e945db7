//! Batch Grouper
//!
//! Clusters a member's requests submitted together into one logical
//! submission for review/editing as a unit. The derivation key is
//! (user id, raid, created_at truncated to the minute); the fold is pure and
//! order-independent.

use std::collections::HashMap;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use uuid::Uuid;

use crate::entities::LootRequest;
use crate::value_objects::{BatchStatus, RequestStatus};

/// A member's requests submitted together, derived - never persisted.
#[derive(Debug, Clone)]
pub struct SubmissionBatch {
    pub user_id: Uuid,
    pub raid: String,
    pub character_name: String,
    pub class: String,
    /// Minute-granularity bucket the batch was derived from
    pub submitted_at: DateTime<Utc>,
    pub requests: Vec<LootRequest>,
}

impl SubmissionBatch {
    /// Derive the batch-level status from the member set.
    ///
    /// Exhaustive, mutually exclusive decision list, evaluated in exactly
    /// this order: Locked, Approved, Rejected, Pending, Mixed. Locked is
    /// checked first so a fully locked batch never reads as anything else.
    #[must_use]
    pub fn status(&self) -> BatchStatus {
        let rows = &self.requests;
        if rows.iter().all(|r| r.locked) {
            BatchStatus::Locked
        } else if rows.iter().all(|r| r.status == RequestStatus::Approved) {
            BatchStatus::Approved
        } else if rows.iter().all(|r| r.status == RequestStatus::Rejected) {
            BatchStatus::Rejected
        } else if rows.iter().any(|r| r.status == RequestStatus::Pending) {
            BatchStatus::Pending
        } else {
            BatchStatus::Mixed
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Truncate a timestamp to its minute bucket
fn minute_bucket(at: DateTime<Utc>) -> DateTime<Utc> {
    // Truncation toward zero is fine here; created_at never predates the epoch.
    at.duration_trunc(TimeDelta::minutes(1)).unwrap_or(at)
}

/// Group requests into submission batches.
///
/// Batches come out ordered by descending `created_at`; rows inside a batch
/// keep descending creation order as well. Shuffling the input produces the
/// same batches with the same derived status.
#[must_use]
pub fn group_requests(requests: Vec<LootRequest>) -> Vec<SubmissionBatch> {
    let mut buckets: HashMap<(Uuid, String, DateTime<Utc>), Vec<LootRequest>> = HashMap::new();

    for request in requests {
        let key = (
            request.user_id,
            request.raid.clone(),
            minute_bucket(request.created_at),
        );
        buckets.entry(key).or_default().push(request);
    }

    let mut batches: Vec<SubmissionBatch> = buckets
        .into_iter()
        .map(|((user_id, raid, submitted_at), mut rows)| {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
            let first = &rows[0];
            SubmissionBatch {
                user_id,
                raid,
                character_name: first.character_name.clone(),
                class: first.class.clone(),
                submitted_at,
                requests: rows,
            }
        })
        .collect();

    // Deterministic order for equal buckets: newest first, then key fields
    batches.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| a.user_id.cmp(&b.user_id))
            .then_with(|| a.raid.cmp(&b.raid))
    });

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Priority;
    use chrono::TimeZone;

    fn request_at(
        user_id: Uuid,
        raid: &str,
        secs: u32,
        status: RequestStatus,
        locked: bool,
    ) -> LootRequest {
        let mut req = LootRequest::new(
            Uuid::new_v4(),
            user_id,
            "thrall#0001".to_string(),
            "Thrall".to_string(),
            "Shaman".to_string(),
            raid.to_string(),
            "Ashkandi".to_string(),
            "Main Hand".to_string(),
            Priority::High,
            None,
        );
        req.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 20, 15, secs).unwrap();
        req.status = status;
        req.locked = locked;
        req
    }

    #[test]
    fn test_same_minute_same_raid_groups_together() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 5, RequestStatus::Pending, false),
            request_at(user, "Molten Core", 40, RequestStatus::Pending, false),
        ];

        let batches = group_requests(rows);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 2);
    }

    #[test]
    fn test_different_raid_splits_batches() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 5, RequestStatus::Pending, false),
            request_at(user, "Naxxramas", 5, RequestStatus::Pending, false),
        ];

        let batches = group_requests(rows);
        assert_eq!(batches.len(), 2);
    }

    #[test]
    fn test_different_user_splits_batches() {
        let rows = vec![
            request_at(Uuid::new_v4(), "Molten Core", 5, RequestStatus::Pending, false),
            request_at(Uuid::new_v4(), "Molten Core", 5, RequestStatus::Pending, false),
        ];

        assert_eq!(group_requests(rows).len(), 2);
    }

    #[test]
    fn test_minute_boundary_splits_batches() {
        let user = Uuid::new_v4();
        let mut a = request_at(user, "Molten Core", 59, RequestStatus::Pending, false);
        a.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 20, 15, 59).unwrap();
        let mut b = a.clone();
        b.id = Uuid::new_v4();
        b.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 20, 16, 0).unwrap();

        assert_eq!(group_requests(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_grouping_is_order_independent() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 5, RequestStatus::Approved, false),
            request_at(user, "Molten Core", 30, RequestStatus::Pending, false),
            request_at(user, "Naxxramas", 10, RequestStatus::Rejected, true),
        ];

        let mut reversed = rows.clone();
        reversed.reverse();

        let forward = group_requests(rows);
        let backward = group_requests(reversed);

        assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(a.raid, b.raid);
            assert_eq!(a.status(), b.status());
            let ids_a: Vec<_> = a.requests.iter().map(|r| r.id).collect();
            let ids_b: Vec<_> = b.requests.iter().map(|r| r.id).collect();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn test_batches_ordered_newest_first() {
        let user = Uuid::new_v4();
        let mut old = request_at(user, "Molten Core", 0, RequestStatus::Pending, false);
        old.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 19, 0, 0).unwrap();
        let new = request_at(user, "Molten Core", 0, RequestStatus::Pending, false);

        let batches = group_requests(vec![old, new]);
        assert_eq!(batches.len(), 2);
        assert!(batches[0].submitted_at > batches[1].submitted_at);
    }

    #[test]
    fn test_status_locked_wins_over_approved() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 1, RequestStatus::Approved, true),
            request_at(user, "Molten Core", 2, RequestStatus::Approved, true),
        ];

        assert_eq!(group_requests(rows)[0].status(), BatchStatus::Locked);
    }

    #[test]
    fn test_status_all_approved() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 1, RequestStatus::Approved, false),
            request_at(user, "Molten Core", 2, RequestStatus::Approved, true),
        ];

        assert_eq!(group_requests(rows)[0].status(), BatchStatus::Approved);
    }

    #[test]
    fn test_status_any_pending_wins_over_mixed() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 1, RequestStatus::Approved, false),
            request_at(user, "Molten Core", 2, RequestStatus::Pending, false),
        ];

        assert_eq!(group_requests(rows)[0].status(), BatchStatus::Pending);
    }

    #[test]
    fn test_status_mixed_decisions() {
        let user = Uuid::new_v4();
        let rows = vec![
            request_at(user, "Molten Core", 1, RequestStatus::Approved, false),
            request_at(user, "Molten Core", 2, RequestStatus::Rejected, false),
        ];

        assert_eq!(group_requests(rows)[0].status(), BatchStatus::Mixed);
    }

    #[test]
    fn test_status_exhaustive_and_exclusive() {
        // Every combination of status/lock over two rows lands on exactly
        // one of the five batch statuses.
        let statuses = [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ];
        let user = Uuid::new_v4();

        for s1 in statuses {
            for s2 in statuses {
                for l1 in [false, true] {
                    for l2 in [false, true] {
                        let rows = vec![
                            request_at(user, "Molten Core", 1, s1, l1),
                            request_at(user, "Molten Core", 2, s2, l2),
                        ];
                        let batch = &group_requests(rows)[0];
                        // status() returns one variant by construction;
                        // assert the decision-list priorities hold
                        let status = batch.status();
                        if l1 && l2 {
                            assert_eq!(status, BatchStatus::Locked);
                        } else if s1 == RequestStatus::Pending || s2 == RequestStatus::Pending {
                            assert_eq!(status, BatchStatus::Pending);
                        }
                    }
                }
            }
        }
    }
}
