//! Moderation status of a request and the derived status of a batch

use serde::{Deserialize, Serialize};

/// Moderation status of a single loot request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting an officer decision
    Pending,
    /// Granted by an officer
    Approved,
    /// Declined by an officer
    Rejected,
}

impl RequestStatus {
    /// A decision has been rendered (the member may edit and resubmit)
    #[must_use]
    pub fn is_decided(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Invalid status: {other}")),
        }
    }
}

/// Status derived for a whole submission batch.
///
/// Evaluated as a decision list in exactly this order: a fully locked batch
/// reads as `Locked` even if every member also happens to be approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchStatus {
    Locked,
    Approved,
    Rejected,
    Pending,
    Mixed,
}

impl BatchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Pending => "Pending",
            Self::Mixed => "Mixed",
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>().unwrap(), status);
        }
        assert!("locked".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_is_decided() {
        assert!(!RequestStatus::Pending.is_decided());
        assert!(RequestStatus::Approved.is_decided());
        assert!(RequestStatus::Rejected.is_decided());
    }

    #[test]
    fn test_batch_status_display() {
        assert_eq!(BatchStatus::Locked.to_string(), "Locked");
        assert_eq!(BatchStatus::Mixed.to_string(), "Mixed");
    }
}
