//! # prio-common
//!
//! Shared utilities including configuration, error handling, session token
//! verification, and telemetry.

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, ItemDbConfig,
    ServerConfig, SessionConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use session::{SessionClaims, SessionService};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
