//! Request priority tag

use serde::{Deserialize, Serialize};

/// Priority of a loot request, lowest to highest.
///
/// `Hr` is the hard-reserve tier and may only be assigned by an officer;
/// the Conflict Validator enforces this at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Hr,
}

impl Priority {
    /// Whether this tier requires the officer role to assign
    #[must_use]
    pub fn requires_officer(self) -> bool {
        matches!(self, Self::Hr)
    }

    /// Storage representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Hr => "HR",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    /// Accepts both the stored form and the submission form's suffixed
    /// labels ("Low-OS", "Medium-MS", "High-SR").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "low-os" => Ok(Self::Low),
            "medium" | "medium-ms" => Ok(Self::Medium),
            "high" | "high-sr" => Ok(Self::High),
            "hr" => Ok(Self::Hr),
            other => Err(format!("Invalid priority: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Hr);
    }

    #[test]
    fn test_priority_parse_stored_form() {
        assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("hr".parse::<Priority>().unwrap(), Priority::Hr);
        assert!("Legendary".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_parse_form_labels() {
        assert_eq!("Low-OS".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("Medium-MS".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("High-SR".parse::<Priority>().unwrap(), Priority::High);
    }

    #[test]
    fn test_only_hr_requires_officer() {
        assert!(Priority::Hr.requires_officer());
        assert!(!Priority::High.requires_officer());
        assert!(!Priority::Medium.requires_officer());
        assert!(!Priority::Low.requires_officer());
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Hr.to_string(), "HR");
        assert_eq!(Priority::Medium.to_string(), "Medium");
    }
}
