//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use st_shared::{AppConfig, TokenConfig};

use crate::domain::entities::token::{Claims, WireClaims};
use crate::domain::entities::user::UserIdentity;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};

use super::config::{TokenServiceConfig, SIGNING_ALGORITHM};
use super::envelope::TokenEnvelope;
use super::key_manager::SigningKeys;

/// Service issuing, decoding and refreshing session tokens
///
/// A token is the claims signed with RS512 and then sealed in the symmetric
/// envelope; decoding opens the envelope before checking the signature. The
/// service holds only immutable key material, so one instance can be shared
/// across threads (e.g. behind an `Arc`).
#[derive(Debug)]
pub struct TokenService {
    config: TokenServiceConfig,
    keys: SigningKeys,
    envelope: TokenEnvelope,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from already loaded key material
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    /// * `keys` - RSA signing key pair
    /// * `envelope` - Symmetric envelope for sealing signed tokens
    pub fn new(config: TokenServiceConfig, keys: SigningKeys, envelope: TokenEnvelope) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Expiry is checked against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            config,
            keys,
            envelope,
            validation,
        }
    }

    /// Builds the service from shared configuration, loading the keystore
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Service ready to issue and verify tokens
    /// * `Err(DomainError)` - Keystore, secret or TTL is unusable; the
    ///   process should not start serving
    pub fn from_config(config: &TokenConfig) -> DomainResult<Self> {
        let service_config = TokenServiceConfig::from_token_config(config)?;
        let keys = SigningKeys::from_keystore_file(
            &config.keystore_path,
            &config.keystore_password,
            &config.key_alias,
        )?;
        let envelope = TokenEnvelope::new(&config.symmetric_secret)?;

        if config.is_using_default_secret() {
            tracing::warn!("Token envelope is using the default development secret");
        }

        Ok(Self::new(service_config, keys, envelope))
    }

    /// Builds the service for a deployment environment
    ///
    /// Same as [`TokenService::from_config`], but refuses to start when the
    /// environment forbids the built-in envelope secret and no other secret
    /// was configured.
    pub fn from_app_config(config: &AppConfig) -> DomainResult<Self> {
        if config.refuses_default_secret() {
            return Err(DomainError::Configuration {
                message: format!(
                    "{:?} environment requires TOKEN_SYMMETRIC_SECRET to be set",
                    config.environment
                ),
            });
        }

        Self::from_config(&config.token)
    }

    /// Token lifetime applied at issue and refresh
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }

    /// Issues a new token for an authenticated user
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Opaque token string
    /// * `Err(DomainError::Validation)` - The username is empty
    /// * `Err(DomainError::Token)` - Signing or encryption failed
    pub fn issue(&self, user: &UserIdentity) -> DomainResult<String> {
        self.issue_at(user, Utc::now())
    }

    pub(crate) fn issue_at(&self, user: &UserIdentity, now: DateTime<Utc>) -> DomainResult<String> {
        user.validate()?;

        let claims = Claims::issue(user, now, self.config.ttl);
        let token = self.seal_claims(&claims)?;

        tracing::info!(
            username = %claims.subject,
            user_id = claims.id,
            expires_at = %claims.expiration,
            "Issued token"
        );
        Ok(token)
    }

    /// Decodes a token into its claims
    ///
    /// Returns `None` for a missing, empty, corrupt, forged or expired token.
    /// The reason is logged at debug level and never returned.
    pub fn decode<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<Claims> {
        self.decode_at(token.into(), Utc::now())
    }

    pub(crate) fn decode_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Option<Claims> {
        let result = match token {
            Some(token) if !token.is_empty() => self.verify_at(token, now),
            _ => Err(TokenError::MissingToken),
        };

        match result {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(cause = e.error_code(), reason = %e, "Rejected token");
                None
            }
        }
    }

    pub(crate) fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let jwt = self.envelope.open(token)?;

        let token_data = decode::<WireClaims>(&jwt, self.keys.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims {
                        reason: e.to_string(),
                    }
                }
                _ => TokenError::InvalidTokenFormat,
            })?;

        let claims = Claims::try_from(token_data.claims)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    /// Expiry of the token, if it decodes
    pub fn expiration<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<DateTime<Utc>> {
        self.decode(token).map(|claims| claims.expiration)
    }

    /// Granted authorities of the token in grant order, if it decodes
    pub fn authorities<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<Vec<String>> {
        self.decode(token).map(|claims| claims.authority_names())
    }

    /// User id of the token, if it decodes
    pub fn user_id<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<i64> {
        self.decode(token).map(|claims| claims.id)
    }

    /// Username (subject) of the token, if it decodes
    pub fn username<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<String> {
        self.decode(token).map(|claims| claims.subject)
    }

    /// Session creation time of the token, if it decodes
    pub fn created_date<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<DateTime<Utc>> {
        self.decode(token).map(|claims| claims.created)
    }

    /// Last refresh time of the token, if it decodes
    pub fn refresh_date<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<DateTime<Utc>> {
        self.decode(token).map(|claims| claims.refresh_date)
    }

    /// Refresh revision of the token, if it decodes
    pub fn refresh_rev<'a>(&self, token: impl Into<Option<&'a str>>) -> Option<u32> {
        self.decode(token).map(|claims| claims.refresh_rev)
    }

    /// Exchanges a valid token for a new one
    ///
    /// The new token keeps the identity, authorities and creation time, with
    /// the refresh revision incremented and a fresh expiry. The old token
    /// stays valid until it expires.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - New opaque token string
    /// * `Err(DomainError::Auth(AuthError::RefreshFailed))` - The presented
    ///   token is invalid or expired
    pub fn refresh(&self, token: &str) -> DomainResult<String> {
        self.refresh_at(token, Utc::now())
    }

    pub(crate) fn refresh_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<String> {
        let claims = self
            .decode_at(Some(token), now)
            .ok_or(DomainError::Auth(AuthError::RefreshFailed))?;

        let refreshed = claims.refreshed(now, self.config.ttl).map_err(|e| {
            tracing::debug!(cause = e.error_code(), reason = %e, "Refused refresh");
            AuthError::RefreshFailed
        })?;
        let token = self.seal_claims(&refreshed)?;

        tracing::info!(
            username = %refreshed.subject,
            user_id = refreshed.id,
            refresh_rev = refreshed.refresh_rev,
            "Refreshed token"
        );
        Ok(token)
    }

    /// Signs the claims and seals the result in the envelope
    fn seal_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(SIGNING_ALGORITHM);
        let jwt = encode(&header, &WireClaims::from(claims), self.keys.encoding_key())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign token");
                TokenError::TokenGenerationFailed
            })?;

        self.envelope.seal(&jwt)
    }
}
