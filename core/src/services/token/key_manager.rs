//! RSA signing key loading from a PKCS#12 keystore

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};
use openssl::pkcs12::Pkcs12;

use crate::errors::{DomainError, KeyStoreError};

/// RSA key pair used to sign and verify token payloads
///
/// Built once at startup and never mutated afterwards. There is no way to
/// obtain an instance without both halves of the pair.
#[derive(Clone)]
pub struct SigningKeys {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Keystore alias the pair was read from
    alias: String,
    /// Where the keys came from
    source: PathBuf,
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("alias", &self.alias)
            .field("source", &self.source)
            .finish()
    }
}

impl SigningKeys {
    /// Loads the signing pair stored under `alias` in a PKCS#12 keystore
    ///
    /// The private key comes from the key bag and the public key from the
    /// entry's certificate, which must carry `alias` as its friendly name and
    /// must match the private key.
    ///
    /// # Arguments
    ///
    /// * `keystore` - DER-encoded PKCS#12 bytes
    /// * `password` - Keystore passphrase
    /// * `alias` - Friendly name of the signing entry
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKeys)` - Keys loaded successfully
    /// * `Err(DomainError::KeyStore)` - The keystore is unusable
    pub fn from_keystore(
        keystore: &[u8],
        password: &str,
        alias: &str,
    ) -> Result<Self, DomainError> {
        Self::load(keystore, password, alias, PathBuf::from("memory"))
    }

    /// Loads the signing pair from a PKCS#12 keystore file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use st_core::services::token::SigningKeys;
    ///
    /// let keys = SigningKeys::from_keystore_file("keys/jwt.p12", "changeit", "jwt")
    ///     .expect("Failed to load keys");
    /// ```
    pub fn from_keystore_file<P: AsRef<Path>>(
        path: P,
        password: &str,
        alias: &str,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref().to_path_buf();
        let keystore = fs::read(&path).map_err(|e| KeyStoreError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::load(&keystore, password, alias, path)
    }

    /// Creates signing keys from PEM strings (useful for embedded keys)
    ///
    /// # Arguments
    ///
    /// * `private_key_pem` - PEM-encoded RSA private key (PKCS#1 or PKCS#8)
    /// * `public_key_pem` - PEM-encoded RSA public key
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        Self::from_pem_bytes(
            private_key_pem.as_bytes(),
            public_key_pem.as_bytes(),
            String::from("pem"),
            PathBuf::from("memory"),
        )
    }

    fn load(
        keystore: &[u8],
        password: &str,
        alias: &str,
        source: PathBuf,
    ) -> Result<Self, DomainError> {
        let pkcs12 = Pkcs12::from_der(keystore).map_err(|e| KeyStoreError::Corrupt {
            message: e.to_string(),
        })?;
        let parsed = pkcs12.parse2(password).map_err(|e| KeyStoreError::Locked {
            message: e.to_string(),
        })?;

        let pkey = parsed.pkey.ok_or_else(|| KeyStoreError::MissingPrivateKey {
            alias: alias.to_string(),
        })?;
        let cert = parsed.cert.ok_or_else(|| KeyStoreError::MissingCertificate {
            alias: alias.to_string(),
        })?;
        let entry_alias = cert.alias().map(String::from_utf8_lossy);
        if entry_alias.as_deref() != Some(alias) {
            return Err(KeyStoreError::MissingAlias {
                alias: alias.to_string(),
            }
            .into());
        }

        let public_key = cert.public_key().map_err(|e| KeyStoreError::UnsupportedKey {
            message: e.to_string(),
        })?;
        if !public_key.public_eq(&pkey) {
            return Err(KeyStoreError::KeyMismatch {
                alias: alias.to_string(),
            }
            .into());
        }

        let private_pem = pkey
            .rsa()
            .and_then(|rsa| rsa.private_key_to_pem())
            .map_err(|e| KeyStoreError::UnsupportedKey {
                message: format!("signing key is not RSA: {}", e),
            })?;
        let public_pem = public_key
            .public_key_to_pem()
            .map_err(|e| KeyStoreError::UnsupportedKey {
                message: e.to_string(),
            })?;

        let keys = Self::from_pem_bytes(&private_pem, &public_pem, alias.to_string(), source)?;
        tracing::info!(
            alias = %keys.alias,
            source = %keys.source.display(),
            "Loaded token signing keys"
        );
        Ok(keys)
    }

    fn from_pem_bytes(
        private_key_pem: &[u8],
        public_key_pem: &[u8],
        alias: String,
        source: PathBuf,
    ) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            KeyStoreError::UnsupportedKey {
                message: format!("Invalid private key format: {}", e),
            }
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            KeyStoreError::UnsupportedKey {
                message: format!("Invalid public key format: {}", e),
            }
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            alias,
            source,
        })
    }

    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Alias of the keystore entry the keys came from
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Path of the keystore file, or `memory` for in-memory sources
    pub fn source(&self) -> &Path {
        &self.source
    }
}
