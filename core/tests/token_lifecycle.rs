//! Integration tests for the token lifecycle through the public API

mod common;

use st_core::{
    AuthError, DomainError, SigningKeys, TokenEnvelope, TokenService, TokenServiceConfig,
    UserIdentity,
};
use st_shared::TokenConfig;

fn build_service() -> TokenService {
    let keys = SigningKeys::from_keystore(&common::KEYSTORE, common::PASSWORD, common::ALIAS)
        .expect("Failed to load signing keys");
    let envelope = TokenEnvelope::new(common::SECRET).expect("Failed to create envelope");
    TokenService::new(TokenServiceConfig::default(), keys, envelope)
}

#[test]
fn test_issue_decode_refresh() {
    let service = build_service();
    let alice = UserIdentity::new("alice", 42, ["ROLE_USER", "ROLE_ADMIN"]);

    // Issue
    let token = service.issue(&alice).expect("Failed to issue token");
    let claims = service.decode(token.as_str()).expect("Token should decode");
    assert_eq!(claims.subject, "alice");
    assert_eq!(claims.id, 42);
    assert_eq!(claims.refresh_rev, 0);
    assert_eq!(claims.authority_names(), vec!["ROLE_USER", "ROLE_ADMIN"]);

    // Accessors agree with the decoded claims
    assert_eq!(service.username(token.as_str()), Some(claims.subject.clone()));
    assert_eq!(service.expiration(token.as_str()), Some(claims.expiration));
    assert_eq!(service.created_date(token.as_str()), Some(claims.created));

    // Refresh
    let refreshed = service.refresh(&token).expect("Failed to refresh token");
    let refreshed_claims = service.decode(refreshed.as_str()).expect("Refreshed token should decode");
    assert_eq!(refreshed_claims.subject, claims.subject);
    assert_eq!(refreshed_claims.id, claims.id);
    assert_eq!(refreshed_claims.authorities, claims.authorities);
    assert_eq!(refreshed_claims.created, claims.created);
    assert_eq!(refreshed_claims.refresh_rev, 1);
    assert!(refreshed_claims.refresh_date >= claims.refresh_date);
    assert!(refreshed_claims.expiration >= claims.expiration);

    // The original token stays usable
    assert!(service.decode(token.as_str()).is_some());
}

#[test]
fn test_missing_and_invalid_tokens() {
    let service = build_service();
    let missing: Option<&str> = None;

    assert!(service.decode(missing).is_none());
    assert!(service.decode("").is_none());
    assert!(service.decode("not-a-token").is_none());
    assert!(service.refresh_rev("not-a-token").is_none());

    assert!(matches!(
        service.refresh("not-a-token"),
        Err(DomainError::Auth(AuthError::RefreshFailed))
    ));
}

#[test]
fn test_tokens_do_not_cross_services() {
    let service = build_service();
    let keys = SigningKeys::from_keystore(&common::KEYSTORE, common::PASSWORD, common::ALIAS)
        .expect("Failed to load signing keys");
    let other = TokenService::new(
        TokenServiceConfig::default(),
        keys,
        TokenEnvelope::new("another-deployment").expect("Failed to create envelope"),
    );

    let token = service
        .issue(&UserIdentity::new("bob", 7, ["ROLE_USER"]))
        .expect("Failed to issue token");
    assert!(other.decode(token.as_str()).is_none());
    assert!(other.refresh(&token).is_err());
}

#[test]
fn test_service_from_config_file() {
    let path = common::keystore_file("lifecycle");
    let config = TokenConfig::new(&path, common::PASSWORD, common::SECRET).with_ttl_days(1);

    let service = TokenService::from_config(&config).expect("Failed to build service");
    std::fs::remove_file(&path).ok();

    let token = service
        .issue(&UserIdentity::new("carol", 9, ["ROLE_USER"]))
        .expect("Failed to issue token");

    // Same keys and secret, so the fixture service reads it too
    let reader = build_service();
    assert_eq!(reader.user_id(token.as_str()), Some(9));

    let claims = service.decode(token.as_str()).expect("Token should decode");
    assert!(claims.expiration - claims.created <= chrono::Duration::days(1));
}
