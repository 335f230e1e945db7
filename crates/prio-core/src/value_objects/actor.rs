//! Request-scoped identity context.
//!
//! Every core operation receives the acting identity explicitly instead of
//! reading ambient session state, so authorization is a pure function of
//! (actor, input, record).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated (or anonymous) identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    /// No session; may only read decided requests
    Anonymous,
    /// An ordinary guild member
    Member { id: Uuid, display_name: String },
    /// An officer; may moderate requests and manage hard reserves
    Officer { id: Uuid, display_name: String },
}

impl Actor {
    /// Create a member or officer actor from a session profile
    #[must_use]
    pub fn authenticated(id: Uuid, display_name: impl Into<String>, officer: bool) -> Self {
        let display_name = display_name.into();
        if officer {
            Self::Officer { id, display_name }
        } else {
            Self::Member { id, display_name }
        }
    }

    /// User id, if authenticated
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::Member { id, .. } | Self::Officer { id, .. } => Some(*id),
        }
    }

    /// Display name, if authenticated
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Member { display_name, .. } | Self::Officer { display_name, .. } => {
                Some(display_name)
            }
        }
    }

    #[must_use]
    pub fn is_officer(&self) -> bool {
        matches!(self, Self::Officer { .. })
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Whether this actor owns the given record
    #[must_use]
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id() == Some(owner_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_picks_role() {
        let id = Uuid::new_v4();
        assert!(Actor::authenticated(id, "Ashkandi", true).is_officer());
        assert!(!Actor::authenticated(id, "Ashkandi", false).is_officer());
    }

    #[test]
    fn test_ownership() {
        let id = Uuid::new_v4();
        let actor = Actor::authenticated(id, "Thrall", false);
        assert!(actor.owns(id));
        assert!(!actor.owns(Uuid::new_v4()));
        assert!(!Actor::Anonymous.owns(id));
    }

    #[test]
    fn test_anonymous_has_no_identity() {
        assert!(Actor::Anonymous.user_id().is_none());
        assert!(Actor::Anonymous.display_name().is_none());
        assert!(Actor::Anonymous.is_anonymous());
    }
}
