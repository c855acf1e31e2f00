//! Keystore generation helpers for tests and demos
//!
//! Builds throwaway PKCS#12 keystores with a fresh RSA key and a self-signed
//! certificate, so nothing secret has to be checked in.

use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509Builder, X509NameBuilder, X509};

/// RSA modulus size for generated signing keys
pub const TEST_KEY_BITS: u32 = 2048;

/// Generates a fresh RSA private key
pub fn generate_rsa_key() -> Result<PKey<Private>, ErrorStack> {
    PKey::from_rsa(Rsa::generate(TEST_KEY_BITS)?)
}

/// Builds a self-signed certificate for `key`
pub fn self_signed_certificate(key: &PKey<Private>) -> Result<X509, ErrorStack> {
    let mut name = X509NameBuilder::new()?;
    name.append_entry_by_text("CN", "sealtoken-test")?;
    let name = name.build();

    let mut builder = X509Builder::new()?;
    builder.set_version(2)?;
    let serial = BigNum::from_u32(1)?.to_asn1_integer()?;
    builder.set_serial_number(&serial)?;
    builder.set_subject_name(&name)?;
    builder.set_issuer_name(&name)?;
    builder.set_pubkey(key)?;
    let not_before = Asn1Time::days_from_now(0)?;
    let not_after = Asn1Time::days_from_now(365)?;
    builder.set_not_before(&not_before)?;
    builder.set_not_after(&not_after)?;
    builder.sign(key, MessageDigest::sha256())?;

    Ok(builder.build())
}

/// Packs a key and certificate into a DER-encoded PKCS#12 keystore
pub fn build_keystore(
    key: &PKey<Private>,
    cert: &X509,
    alias: &str,
    password: &str,
) -> Result<Vec<u8>, ErrorStack> {
    Pkcs12::builder()
        .name(alias)
        .pkey(key)
        .cert(cert)
        .build2(password)?
        .to_der()
}

/// Generates a complete keystore with one RSA signing entry under `alias`
pub fn generate_keystore(alias: &str, password: &str) -> Result<Vec<u8>, ErrorStack> {
    let key = generate_rsa_key()?;
    let cert = self_signed_certificate(&key)?;
    build_keystore(&key, &cert, alias, password)
}
