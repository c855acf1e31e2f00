//! Shared fixtures for integration tests

use std::path::PathBuf;

use once_cell::sync::Lazy;
use st_core::testing;

pub const ALIAS: &str = "jwt";
pub const PASSWORD: &str = "integration-pass";
pub const SECRET: &str = "integration-envelope-secret";

/// DER-encoded PKCS#12 keystore with one RSA entry under `ALIAS`
pub static KEYSTORE: Lazy<Vec<u8>> = Lazy::new(|| {
    testing::generate_keystore(ALIAS, PASSWORD).expect("Failed to generate keystore")
});

/// Writes the keystore to a per-test temp file
pub fn keystore_file(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "st-core-it-{}-{}.p12",
        std::process::id(),
        name
    ));
    std::fs::write(&path, KEYSTORE.as_slice()).expect("Failed to write keystore");
    path
}
