//! Loot request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the loot_requests table
#[derive(Debug, Clone, FromRow)]
pub struct LootRequestModel {
    pub id: Uuid,
    pub user_id: Uuid,
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
