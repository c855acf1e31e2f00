//! # SealToken Core
//!
//! Session token issuance and validation.
//! Tokens are RS512-signed JWTs sealed in an AES-256-GCM envelope; this crate
//! holds the claims model, the keystore loader, the envelope and the
//! `TokenService` that ties them together.

pub mod domain;
pub mod errors;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{Authority, Claims, UserIdentity};
pub use errors::{AuthError, DomainError, DomainResult, KeyStoreError, TokenError};
pub use services::{SigningKeys, TokenEnvelope, TokenService, TokenServiceConfig};
