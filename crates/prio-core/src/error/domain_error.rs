//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Loot request not found: {0}")]
    RequestNotFound(Uuid),

    #[error("Hard reserve not found: {0}")]
    ReserveNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("\"{item}\" is hard reserved")]
    HardReserveConflict { item: String },

    #[error("Submission contained no valid items")]
    EmptyBatch,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only officers may assign the HR priority")]
    InsufficientPrivilege,

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Not the owner of this request")]
    NotRequestOwner,

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Record is locked")]
    RecordLocked,

    #[error("Request is not in a resubmittable state")]
    NotResubmittable,

    #[error("Request is not editable in its current state")]
    NotEditable,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("\"{item}\" is already hard reserved")]
    ReserveAlreadyExists { item: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::RequestNotFound(_) => "UNKNOWN_REQUEST",
            Self::ReserveNotFound(_) => "UNKNOWN_RESERVE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::HardReserveConflict { .. } => "HARD_RESERVE_CONFLICT",
            Self::EmptyBatch => "EMPTY_BATCH",

            // Authorization
            Self::InsufficientPrivilege => "INSUFFICIENT_PRIVILEGE",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::NotRequestOwner => "NOT_REQUEST_OWNER",

            // State
            Self::RecordLocked => "RECORD_LOCKED",
            Self::NotResubmittable => "NOT_RESUBMITTABLE",
            Self::NotEditable => "NOT_EDITABLE",

            // Conflict
            Self::ReserveAlreadyExists { .. } => "RESERVE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestNotFound(_) | Self::ReserveNotFound(_))
    }

    /// Check if this is a validation error (submission aborted, nothing persisted)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::HardReserveConflict { .. } | Self::EmptyBatch
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPrivilege | Self::PermissionDenied | Self::NotRequestOwner
        )
    }

    /// Check if this is a state conflict (record left unchanged, caller should reload)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RecordLocked
                | Self::NotResubmittable
                | Self::NotEditable
                | Self::ReserveAlreadyExists { .. }
        )
    }
}
