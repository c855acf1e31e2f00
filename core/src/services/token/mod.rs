//! Token service module
//!
//! This module handles the whole token lifecycle:
//! - RSA signing keys loaded from a PKCS#12 keystore
//! - RS512 signing of typed claims
//! - AES-256-GCM envelope around the signed token
//! - Issue, decode and refresh operations

mod config;
mod envelope;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use config::{TokenServiceConfig, DEFAULT_TOKEN_TTL_DAYS, SIGNING_ALGORITHM};
pub use envelope::TokenEnvelope;
pub use key_manager::SigningKeys;
pub use service::TokenService;
