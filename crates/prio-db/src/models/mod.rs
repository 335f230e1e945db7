//! Database models with SQLx `FromRow` derives

mod request;
mod reserve;

pub use request::LootRequestModel;
pub use reserve::HardReserveModel;
