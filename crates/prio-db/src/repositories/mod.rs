//! PostgreSQL repository implementations

mod error;
mod request;
mod reserve;

pub use request::PgRequestRepository;
pub use reserve::PgReserveRepository;
