//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token lifetime, signing keystore and envelope secret
//! - `environment` - Deployment environment and logging configuration

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::TokenConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Token issuance configuration
    pub token: TokenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration for `environment` with default token settings
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            token: TokenConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment
    ///
    /// `RUST_LOG`, when set, replaces the environment's log level.
    pub fn from_env() -> Self {
        let mut config = Self::for_environment(Environment::from_env());
        config.token = TokenConfig::from_env();
        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }
        config
    }

    /// True when the envelope secret is the built-in one and the
    /// environment does not allow that
    pub fn refuses_default_secret(&self) -> bool {
        self.token.is_using_default_secret() && !self.environment.allows_default_secret()
    }
}
