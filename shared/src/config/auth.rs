//! Token signing and encryption configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Development-only envelope secret; never valid outside local runs
const DEFAULT_SYMMETRIC_SECRET: &str = "development-secret-please-change-in-production";

/// Token issuance configuration
///
/// Covers everything the token core needs at startup: how long tokens live,
/// where the signing keystore lives and how to unlock it, and the secret for
/// the symmetric envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Token lifetime in days, applied at issue and at every refresh
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,

    /// Path to the PKCS#12 keystore holding the signing key pair
    #[serde(default = "default_keystore_path")]
    pub keystore_path: PathBuf,

    /// Passphrase protecting the keystore
    #[serde(default)]
    pub keystore_password: String,

    /// Alias (friendly name) of the signing entry inside the keystore
    #[serde(default = "default_key_alias")]
    pub key_alias: String,

    /// Secret for the symmetric envelope around signed tokens
    #[serde(default = "default_symmetric_secret")]
    pub symmetric_secret: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            keystore_path: default_keystore_path(),
            keystore_password: String::new(),
            key_alias: default_key_alias(),
            symmetric_secret: default_symmetric_secret(),
        }
    }
}

impl TokenConfig {
    /// Create a token configuration for a keystore and envelope secret
    pub fn new(
        keystore_path: impl Into<PathBuf>,
        keystore_password: impl Into<String>,
        symmetric_secret: impl Into<String>,
    ) -> Self {
        Self {
            keystore_path: keystore_path.into(),
            keystore_password: keystore_password.into(),
            symmetric_secret: symmetric_secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.ttl_days = days;
        self
    }

    /// Set the keystore alias of the signing entry
    pub fn with_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.key_alias = alias.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.symmetric_secret == DEFAULT_SYMMETRIC_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let ttl_days = std::env::var("TOKEN_TTL_DAYS")
            .unwrap_or_else(|_| default_ttl_days().to_string())
            .parse()
            .unwrap_or_else(|_| default_ttl_days());
        let keystore_path = std::env::var("KEYSTORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_keystore_path());
        let keystore_password = std::env::var("KEYSTORE_PASSWORD").unwrap_or_default();
        let key_alias = std::env::var("KEYSTORE_ALIAS").unwrap_or_else(|_| default_key_alias());
        let symmetric_secret = std::env::var("TOKEN_SYMMETRIC_SECRET")
            .unwrap_or_else(|_| default_symmetric_secret());

        Self {
            ttl_days,
            keystore_path,
            keystore_password,
            key_alias,
            symmetric_secret,
        }
    }
}

fn default_ttl_days() -> i64 {
    7
}

fn default_keystore_path() -> PathBuf {
    PathBuf::from("keys/jwt.p12")
}

fn default_key_alias() -> String {
    String::from("jwt")
}

fn default_symmetric_secret() -> String {
    String::from(DEFAULT_SYMMETRIC_SECRET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.ttl_days, 7);
        assert_eq!(config.key_alias, "jwt");
        assert_eq!(config.keystore_path, PathBuf::from("keys/jwt.p12"));
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::new("/etc/sealtoken/jwt.p12", "changeit", "envelope-secret")
            .with_ttl_days(1)
            .with_key_alias("signing");

        assert_eq!(config.ttl_days, 1);
        assert_eq!(config.key_alias, "signing");
        assert_eq!(config.keystore_password, "changeit");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_token_config_deserialize_defaults() {
        let config: TokenConfig =
            serde_json::from_str(r#"{"keystore_password":"pw","symmetric_secret":"s"}"#).unwrap();
        assert_eq!(config.ttl_days, 7);
        assert_eq!(config.key_alias, "jwt");
        assert_eq!(config.keystore_password, "pw");
    }
}
