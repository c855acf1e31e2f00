
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::domain::entities::user::UserIdentity;
use crate::services::token::{SigningKeys, TokenEnvelope, TokenService, TokenServiceConfig};
use crate::testing;

pub(crate) const TEST_ALIAS: &str = "jwt";
pub(crate) const TEST_PASSWORD: &str = "changeit";
pub(crate) const TEST_SECRET: &str = "unit-test-envelope-secret";

/// One keystore for the whole test binary; RSA key generation is slow
pub(crate) static KEYSTORE: Lazy<Vec<u8>> = Lazy::new(|| {
    testing::generate_keystore(TEST_ALIAS, TEST_PASSWORD).expect("Failed to generate keystore")
});

pub(crate) fn signing_keys() -> SigningKeys {
    SigningKeys::from_keystore(&KEYSTORE, TEST_PASSWORD, TEST_ALIAS).expect("Failed to load keys")
}

pub(crate) fn service_with_ttl(ttl: Duration) -> TokenService {
    TokenService::new(
        TokenServiceConfig::with_ttl(ttl).unwrap(),
        signing_keys(),
        TokenEnvelope::new(TEST_SECRET).unwrap(),
    )
}

pub(crate) fn service() -> TokenService {
    service_with_ttl(Duration::days(7))
}

pub(crate) fn alice() -> UserIdentity {
    UserIdentity::new("alice", 42, ["ROLE_USER", "ROLE_ADMIN"])
}

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}
