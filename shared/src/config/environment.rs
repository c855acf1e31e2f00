//! Deployment environment and the logging setup that goes with it

use serde::{Deserialize, Serialize};

/// Variable naming the deployment environment
pub const ENVIRONMENT_VAR: &str = "SEALTOKEN_ENV";

/// Where the token service is deployed
///
/// Local runs may fall back to the built-in envelope secret; production may
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Reads `SEALTOKEN_ENV`; anything but `prod`/`production` means development
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .map(|name| Self::from_name(&name))
            .unwrap_or_default()
    }

    /// Maps an environment name to a variant, case-insensitively
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Whether tokens may be sealed with the built-in development secret
    pub fn allows_default_secret(&self) -> bool {
        *self == Environment::Development
    }

    /// `.env` file loaded on top of the plain `.env`
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Production => ".env.production",
        }
    }
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `st_core=debug`
    pub level: String,

    pub format: LogFormat,

    /// ANSI colors; off for machine-read output
    #[serde(default)]
    pub colored: bool,

    /// Include file and line of each event
    #[serde(default)]
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Logging defaults for an environment
    ///
    /// Development logs rejected tokens (emitted at debug) in a readable
    /// form. Production keeps JSON at info so issue and refresh events are
    /// still recorded.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                colored: true,
                source_location: true,
            },
            Environment::Production => Self {
                level: String::from("info"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_name() {
        assert_eq!(Environment::from_name("production"), Environment::Production);
        assert_eq!(Environment::from_name(" PROD "), Environment::Production);
        assert_eq!(Environment::from_name("dev"), Environment::Development);
        assert_eq!(Environment::from_name("staging"), Environment::Development);
    }

    #[test]
    fn test_default_secret_policy() {
        assert!(Environment::Development.allows_default_secret());
        assert!(!Environment::Production.allows_default_secret());
        assert_eq!(Environment::Production.env_file(), ".env.production");
    }

    #[test]
    fn test_production_logs_json_at_info() {
        let log = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(log.level, "info");
        assert_eq!(log.format, LogFormat::Json);
        assert!(!log.colored);

        let dev = LoggingConfig::default();
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, LogFormat::Pretty);
    }
}
