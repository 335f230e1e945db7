//! # prio-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used request types
pub use dto::requests::{
    DecideRequest, OfficerEditRequest, RaidBlock, ReserveCreateRequest, ReserveUpdateRequest,
    SubmitBatchRequest, SubmitItemRow, UpdateRequestFields,
};

// Re-export commonly used response types
pub use dto::responses::{
    BatchResponse, HealthResponse, ItemInfoResponse, LootRequestResponse, PublicRequestResponse,
    ReadinessResponse, ReserveResponse,
};

// Re-export services
pub use services::{
    BatchService, ItemCatalog, RequestService, ReserveService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
