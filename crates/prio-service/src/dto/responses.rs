//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! UUIDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use prio_core::{LootRequest, HardReserveEntry, SubmissionBatch};

// ============================================================================
// Loot Request Responses
// ============================================================================

/// Full request view for the owner and for officers
#[derive(Debug, Clone, Serialize)]
pub struct LootRequestResponse {
    pub id: String,
    pub user_id: String,
    pub discord_name: String,
    pub character_name: String,
    pub class: String,
    pub raid: String,
    pub item_name: String,
    pub slot: String,
    pub priority: String,
    pub user_note: Option<String>,
    pub admin_note: Option<String>,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&LootRequest> for LootRequestResponse {
    fn from(request: &LootRequest) -> Self {
        Self {
            id: request.id.to_string(),
            user_id: request.user_id.to_string(),
            discord_name: request.discord_name.clone(),
            character_name: request.character_name.clone(),
            class: request.class.clone(),
            raid: request.raid.clone(),
            item_name: request.item_name.clone(),
            slot: request.slot.clone(),
            priority: request.priority.to_string(),
            user_note: request.user_note.clone(),
            admin_note: request.admin_note.clone(),
            status: request.status.to_string(),
            reviewed_by: request.reviewed_by.clone(),
            locked: request.locked,
            created_at: request.created_at,
        }
    }
}

/// Trimmed request view for the public priority overview - no notes, no
/// owner identity beyond the character
#[derive(Debug, Clone, Serialize)]
pub struct PublicRequestResponse {
    pub id: String,
    pub character_name: String,
    pub class: String,
    pub raid: String,
    pub item_name: String,
    pub slot: String,
    pub priority: String,
    pub status: String,
}

impl From<&LootRequest> for PublicRequestResponse {
    fn from(request: &LootRequest) -> Self {
        Self {
            id: request.id.to_string(),
            character_name: request.character_name.clone(),
            class: request.class.clone(),
            raid: request.raid.clone(),
            item_name: request.item_name.clone(),
            slot: request.slot.clone(),
            priority: request.priority.to_string(),
            status: request.status.to_string(),
        }
    }
}

// ============================================================================
// Batch Responses
// ============================================================================

/// One grouped submission with its derived status
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub user_id: String,
    pub raid: String,
    pub character_name: String,
    pub class: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
    pub requests: Vec<LootRequestResponse>,
}

impl From<&SubmissionBatch> for BatchResponse {
    fn from(batch: &SubmissionBatch) -> Self {
        Self {
            user_id: batch.user_id.to_string(),
            raid: batch.raid.clone(),
            character_name: batch.character_name.clone(),
            class: batch.class.clone(),
            submitted_at: batch.submitted_at,
            status: batch.status().to_string(),
            requests: batch.requests.iter().map(LootRequestResponse::from).collect(),
        }
    }
}

// ============================================================================
// Hard Reserve Responses
// ============================================================================

/// Hard reserve entry view
#[derive(Debug, Clone, Serialize)]
pub struct ReserveResponse {
    pub id: String,
    pub item_name: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&HardReserveEntry> for ReserveResponse {
    fn from(entry: &HardReserveEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            item_name: entry.item_name.clone(),
            note: entry.note.clone(),
            created_at: entry.created_at,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

// ============================================================================
// Item Catalog Responses
// ============================================================================

/// External item metadata used to pre-fill the submission form
#[derive(Debug, Clone, Serialize)]
pub struct ItemInfoResponse {
    pub id: i64,
    pub name: String,
}
