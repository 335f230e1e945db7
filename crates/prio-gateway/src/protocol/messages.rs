//! Gateway message payloads
//!
//! JSON messages tagged by an `op` field. A client identifies with its
//! session token, announces itself onto the roster, and heartbeats to keep
//! the connection alive.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roster::RosterEvent;

/// Messages sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authenticate the connection with a session token
    Identify { token: String },
    /// Join the roster. Identity fields come from the verified session, the
    /// client only supplies its avatar (which may differ per device).
    Announce {
        #[serde(default)]
        avatar: Option<String>,
    },
    /// Keep-alive
    Heartbeat,
}

/// Payload of the Ready message sent after a successful Identify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyPayload {
    pub user_id: Uuid,
    pub display_name: String,
    pub is_officer: bool,
    /// Milliseconds between expected heartbeats
    pub heartbeat_interval: u64,
}

/// Messages sent by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Identification accepted
    Ready { data: ReadyPayload },
    /// Roster change or initial snapshot
    Roster { event: RosterEvent },
    /// Heartbeat acknowledgement
    HeartbeatAck,
    /// Fatal protocol error; the connection closes after this
    Error { message: String },
}

impl ServerMessage {
    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ClientMessage {
    /// Parse from the JSON wire form
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_roundtrip() {
        let msg = ClientMessage::Identify {
            token: "abc.def.ghi".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"op\":\"identify\""));
        assert_eq!(ClientMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_announce_avatar_defaults_to_none() {
        let msg = ClientMessage::from_json(r#"{"op":"announce"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Announce { avatar: None });
    }

    #[test]
    fn test_server_message_wire_form() {
        let msg = ServerMessage::HeartbeatAck;
        assert_eq!(msg.to_json().unwrap(), r#"{"op":"heartbeat_ack"}"#);
    }
}
