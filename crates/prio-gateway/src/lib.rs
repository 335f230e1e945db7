//! # prio-gateway
//!
//! WebSocket gateway tracking which members are currently connected.
//!
//! The roster is purely in-process: a restart empties it and clients
//! re-announce on reconnect. Every change fans out to all connected clients
//! as a roster event.

pub mod protocol;
pub mod roster;
pub mod server;

pub use roster::{Roster, RosterEvent, RosterView};
pub use server::{create_app, create_gateway_state, run, run_server, GatewayState};
