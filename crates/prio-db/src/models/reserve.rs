//! Hard reserve database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the hard_reserves table
#[derive(Debug, Clone, FromRow)]
pub struct HardReserveModel {
    pub id: Uuid,
    pub item_name: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
