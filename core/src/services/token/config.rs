//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use st_shared::TokenConfig;

use crate::errors::{DomainError, DomainResult};

/// Signature algorithm for token payloads
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS512;

/// Default token lifetime in days
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Token lifetime, applied at issue and at every refresh
    pub ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }
}

impl TokenServiceConfig {
    /// Creates a config with the given token lifetime
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Lifetime accepted
    /// * `Err(DomainError::Configuration)` - Negative lifetime
    pub fn with_ttl(ttl: Duration) -> DomainResult<Self> {
        if ttl < Duration::zero() {
            return Err(DomainError::Configuration {
                message: format!("token TTL must not be negative, got {}", ttl),
            });
        }
        Ok(Self { ttl })
    }

    /// Creates a config with a lifetime in whole days
    ///
    /// # Returns
    ///
    /// * `Ok(TokenServiceConfig)` - Lifetime accepted
    /// * `Err(DomainError::Configuration)` - Negative or out-of-range lifetime
    pub fn with_ttl_days(days: i64) -> DomainResult<Self> {
        if days < 0 {
            return Err(DomainError::Configuration {
                message: format!("token TTL must not be negative, got {} days", days),
            });
        }

        let ttl = Duration::try_days(days).ok_or_else(|| DomainError::Configuration {
            message: format!("token TTL of {} days is out of range", days),
        })?;
        Self::with_ttl(ttl)
    }

    /// Derives the service config from the shared token configuration
    pub fn from_token_config(config: &TokenConfig) -> DomainResult<Self> {
        Self::with_ttl_days(config.ttl_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.ttl, Duration::days(7));
    }

    #[test]
    fn test_ttl_days() {
        assert_eq!(TokenServiceConfig::with_ttl_days(1).unwrap().ttl, Duration::days(1));
        assert_eq!(TokenServiceConfig::with_ttl_days(0).unwrap().ttl, Duration::zero());
    }

    #[test]
    fn test_invalid_ttl_days() {
        assert!(matches!(
            TokenServiceConfig::with_ttl_days(-1),
            Err(DomainError::Configuration { .. })
        ));
        assert!(matches!(
            TokenServiceConfig::with_ttl_days(i64::MAX),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_negative_ttl_is_rejected() {
        assert!(matches!(
            TokenServiceConfig::with_ttl(Duration::seconds(-1)),
            Err(DomainError::Configuration { .. })
        ));
        assert_eq!(
            TokenServiceConfig::with_ttl(Duration::hours(2)).unwrap().ttl,
            Duration::hours(2)
        );
    }

    #[test]
    fn test_from_token_config() {
        let shared = TokenConfig::default().with_ttl_days(3);
        let config = TokenServiceConfig::from_token_config(&shared).unwrap();
        assert_eq!(config.ttl, Duration::days(3));
    }
}
