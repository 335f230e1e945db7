//! Gateway state

use std::sync::Arc;

use prio_common::{AppConfig, SessionService};

use crate::roster::Roster;

/// Shared state for the gateway server
#[derive(Clone)]
pub struct GatewayState {
    roster: Arc<Roster>,
    session_service: Arc<SessionService>,
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new GatewayState
    pub fn new(
        roster: Arc<Roster>,
        session_service: Arc<SessionService>,
        config: AppConfig,
    ) -> Self {
        Self {
            roster,
            session_service,
            config: Arc::new(config),
        }
    }

    /// Get the roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get the session service
    pub fn session_service(&self) -> &SessionService {
        &self.session_service
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("roster", &"Roster")
            .field("config", &"AppConfig")
            .finish()
    }
}
