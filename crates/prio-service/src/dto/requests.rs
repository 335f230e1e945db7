//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Cap on raid blocks in one submission, same as the multi-raid form
pub const MAX_RAID_BLOCKS: usize = 8;

// ============================================================================
// Submission Requests
// ============================================================================

/// One item row in a submission. Blank rows (empty item or slot) are
/// dropped by the Conflict Validator, not rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitItemRow {
    pub item_name: String,

    pub slot: String,

    /// Priority label; both stored ("High") and form ("High-SR") spellings
    /// are accepted
    pub priority: String,

    pub note: Option<String>,
}

/// One raid block: a raid name plus its item rows
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RaidBlock {
    #[validate(length(min = 1, max = 100, message = "Raid name must be 1-100 characters"))]
    pub raid: String,

    pub items: Vec<SubmitItemRow>,
}

/// Whole batch submission: character info plus up to eight raid blocks
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitBatchRequest {
    #[validate(length(min = 1, max = 64, message = "Character name must be 1-64 characters"))]
    pub character_name: String,

    #[validate(length(min = 1, max = 32, message = "Class must be 1-32 characters"))]
    pub class: String,

    #[validate(
        length(
            min = 1,
            max = 8,
            message = "Submission must contain between 1 and 8 raid blocks"
        ),
        nested
    )]
    pub raids: Vec<RaidBlock>,
}

// ============================================================================
// Lifecycle Requests
// ============================================================================

/// Officer decision on a request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DecideRequest {
    /// "approved" or "rejected"
    pub verdict: String,
}

/// Member edit of their own decided request (priority and/or note)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRequestFields {
    pub priority: Option<String>,

    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub user_note: Option<String>,
}

/// Officer edit of moderation-side fields
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OfficerEditRequest {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub item_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Raid name must be 1-100 characters"))]
    pub raid: Option<String>,

    /// Absent leaves the note untouched; an empty string clears it
    #[validate(length(max = 1000, message = "Note must be at most 1000 characters"))]
    pub admin_note: Option<String>,
}

// ============================================================================
// Hard Reserve Requests
// ============================================================================

/// Create a hard reserve entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReserveCreateRequest {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub item_name: String,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Update a hard reserve entry
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReserveUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub item_name: Option<String>,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}
