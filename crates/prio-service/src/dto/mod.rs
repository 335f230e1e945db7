//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    DecideRequest, OfficerEditRequest, RaidBlock, ReserveCreateRequest, ReserveUpdateRequest,
    SubmitBatchRequest, SubmitItemRow, UpdateRequestFields,
};

// Re-export commonly used response types
pub use responses::{
    BatchResponse, HealthChecks, HealthResponse, ItemInfoResponse, LootRequestResponse,
    PublicRequestResponse, ReadinessResponse, ReserveResponse,
};
