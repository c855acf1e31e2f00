//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, KeyStoreError, TokenError};

#[test]
fn test_refresh_failed_message() {
    let error = AuthError::RefreshFailed;
    assert_eq!(error.to_string(), "refresh failed: invalid or expired token");
    assert_eq!(error.error_code(), "REFRESH_FAILED");
}

#[test]
fn test_auth_error_bridges_transparently() {
    let error: DomainError = AuthError::RefreshFailed.into();
    assert_eq!(error.to_string(), "refresh failed: invalid or expired token");
    assert!(matches!(error, DomainError::Auth(AuthError::RefreshFailed)));
}

#[test]
fn test_token_error_codes() {
    assert_eq!(TokenError::TokenExpired.error_code(), "TOKEN_EXPIRED");
    assert_eq!(TokenError::DecryptionFailed.error_code(), "TOKEN_DECRYPTION_FAILED");

    let error = TokenError::InvalidClaims {
        reason: "jti is not numeric".to_string(),
    };
    assert_eq!(error.error_code(), "INVALID_CLAIMS");
    assert!(error.to_string().contains("jti is not numeric"));
}

#[test]
fn test_keystore_errors_bridge_transparently() {
    let error: DomainError = KeyStoreError::MissingAlias {
        alias: "jwt".to_string(),
    }
    .into();
    assert!(matches!(
        error,
        DomainError::KeyStore(KeyStoreError::MissingAlias { .. })
    ));
    assert_eq!(error.to_string(), "Keystore has no entry for alias 'jwt'");
}
