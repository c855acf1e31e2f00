//! Domain-specific error types for token issuance and validation
//!
//! `TokenError` and `KeyStoreError` describe why something failed internally.
//! Token rejection reasons are only ever logged; callers of the decode path
//! see an absent value. `AuthError` is the reported, user-facing class.

use thiserror::Error;

/// Authentication errors surfaced to callers
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("refresh failed: invalid or expired token")]
    RefreshFailed,
}

impl AuthError {
    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::RefreshFailed => "REFRESH_FAILED",
        }
    }
}

/// Token-related errors
///
/// These classify why a presented token was rejected or why a token could
/// not be produced.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token missing")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token decryption failed")]
    DecryptionFailed,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims: {reason}")]
    InvalidClaims { reason: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::MissingToken => "TOKEN_MISSING",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::DecryptionFailed => "TOKEN_DECRYPTION_FAILED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims { .. } => "INVALID_CLAIMS",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

/// Keystore loading errors
///
/// All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum KeyStoreError {
    #[error("Failed to read keystore {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Keystore is not a valid PKCS#12 container: {message}")]
    Corrupt { message: String },

    #[error("Keystore could not be unlocked: {message}")]
    Locked { message: String },

    #[error("Keystore has no entry for alias '{alias}'")]
    MissingAlias { alias: String },

    #[error("Keystore entry '{alias}' has no private key")]
    MissingPrivateKey { alias: String },

    #[error("Keystore entry '{alias}' has no certificate")]
    MissingCertificate { alias: String },

    #[error("Keystore entry '{alias}' certificate does not match its private key")]
    KeyMismatch { alias: String },

    #[error("Unsupported signing key: {message}")]
    UnsupportedKey { message: String },
}
