//! AES-256-GCM envelope around signed tokens

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult, TokenError};

/// AES-GCM nonce length in bytes
const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
const TAG_LEN: usize = 16;

/// Symmetric encryption layer applied on top of the signed JWT
///
/// The wire form is URL-safe base64 (no padding) of `nonce || ciphertext`,
/// which fits in cookies and headers without escaping. The key is the
/// SHA-256 digest of a configured secret that is unrelated to the signing
/// keys.
#[derive(Clone)]
pub struct TokenEnvelope {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for TokenEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEnvelope").finish_non_exhaustive()
    }
}

impl TokenEnvelope {
    /// Create an envelope keyed by `secret`
    ///
    /// # Returns
    ///
    /// * `Ok(TokenEnvelope)` - Envelope ready for use
    /// * `Err(DomainError::Configuration)` - The secret is empty
    pub fn new(secret: &str) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "symmetric secret must not be empty".to_string(),
            });
        }

        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);

        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Generate a random nonce for AES-GCM
    fn generate_nonce() -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    /// Encrypt a signed token into its opaque wire form
    pub fn seal(&self, plaintext: &str) -> Result<String, TokenError> {
        let nonce = Self::generate_nonce();
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| TokenError::TokenGenerationFailed)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Decrypt an opaque token back into the signed JWT
    ///
    /// Fails on anything not produced by `seal` under the same secret.
    pub fn open(&self, token: &str) -> Result<String, TokenError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| TokenError::InvalidTokenFormat)?;
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(TokenError::InvalidTokenFormat);
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| TokenError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| TokenError::InvalidTokenFormat)
    }
}
