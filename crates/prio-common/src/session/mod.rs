//! Session token verification

mod token;

pub use token::{SessionClaims, SessionService};
