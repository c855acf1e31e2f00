//! Token claims for signed, encrypted session tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

use super::user::UserIdentity;

/// A single granted authority as carried in the token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Authority {
    /// Role or permission string
    pub authority: String,
}

impl Authority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username
    pub subject: String,

    /// User identifier
    pub id: i64,

    /// Username again, kept for consumers that read the owner claim
    pub owner: String,

    /// Issue time of the session
    pub created: DateTime<Utc>,

    /// Time of the most recent refresh (equals `created` until refreshed)
    pub refresh_date: DateTime<Utc>,

    /// Number of refreshes since issue
    pub refresh_rev: u32,

    /// Granted authorities, in grant order
    pub authorities: Vec<Authority>,

    /// Absolute expiry
    pub expiration: DateTime<Utc>,
}

impl Claims {
    /// Creates claims for a freshly issued token
    ///
    /// # Arguments
    ///
    /// * `user` - The authenticated user
    /// * `now` - Issue time
    /// * `ttl` - Token lifetime
    pub fn issue(user: &UserIdentity, now: DateTime<Utc>, ttl: Duration) -> Self {
        let now = truncate_to_millis(now);
        Self {
            subject: user.username.clone(),
            id: user.id,
            owner: user.username.clone(),
            created: now,
            refresh_date: now,
            refresh_rev: 0,
            authorities: user.authorities.iter().map(Authority::new).collect(),
            expiration: expiry_from(now, ttl),
        }
    }

    /// Returns the claims for the next refresh of this session
    ///
    /// Identity fields and `created` carry over; the revision goes up by one
    /// and both the refresh date and expiry are recomputed from `now`.
    pub fn refreshed(&self, now: DateTime<Utc>, ttl: Duration) -> Result<Self, TokenError> {
        let refresh_rev = self
            .refresh_rev
            .checked_add(1)
            .ok_or_else(|| TokenError::InvalidClaims {
                reason: "refresh revision overflow".to_string(),
            })?;
        let now = truncate_to_millis(now);

        Ok(Self {
            refresh_date: now,
            refresh_rev,
            expiration: expiry_from(now, ttl),
            ..self.clone()
        })
    }

    /// Checks if the claims have expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }

    /// Authority strings in grant order
    pub fn authority_names(&self) -> Vec<String> {
        self.authorities.iter().map(|a| a.authority.clone()).collect()
    }

    /// Whether the given authority was granted
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a.authority == authority)
    }
}

/// JWT payload as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct WireClaims {
    pub sub: String,
    pub jti: String,
    pub exp: i64,
    #[serde(rename = "KeyOwner")]
    pub owner: String,
    #[serde(rename = "Created")]
    pub created: i64,
    #[serde(rename = "RefreshDate")]
    pub refresh_date: i64,
    #[serde(rename = "RefreshRev")]
    pub refresh_rev: u32,
    #[serde(rename = "OwnerRolesAuthorities")]
    pub authorities: Vec<Authority>,
}

impl From<&Claims> for WireClaims {
    fn from(claims: &Claims) -> Self {
        Self {
            sub: claims.subject.clone(),
            jti: claims.id.to_string(),
            exp: claims.expiration.timestamp(),
            owner: claims.owner.clone(),
            created: claims.created.timestamp_millis(),
            refresh_date: claims.refresh_date.timestamp_millis(),
            refresh_rev: claims.refresh_rev,
            authorities: claims.authorities.clone(),
        }
    }
}

impl TryFrom<WireClaims> for Claims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let id = wire.jti.parse::<i64>().map_err(|_| TokenError::InvalidClaims {
            reason: "jti is not a numeric user id".to_string(),
        })?;
        let created = millis_to_datetime(wire.created, "Created")?;
        let refresh_date = millis_to_datetime(wire.refresh_date, "RefreshDate")?;
        let expiration =
            DateTime::from_timestamp(wire.exp, 0).ok_or_else(|| TokenError::InvalidClaims {
                reason: "exp out of range".to_string(),
            })?;

        Ok(Self {
            subject: wire.sub,
            id,
            owner: wire.owner,
            created,
            refresh_date,
            refresh_rev: wire.refresh_rev,
            authorities: wire.authorities,
            expiration,
        })
    }
}

fn millis_to_datetime(millis: i64, claim: &str) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| TokenError::InvalidClaims {
        reason: format!("{} out of range", claim),
    })
}

// The wire format keeps milliseconds for dates and whole seconds for exp.
fn truncate_to_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(at.timestamp_millis()).unwrap_or(at)
}

fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    let expiry = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
    DateTime::from_timestamp(expiry.timestamp(), 0).unwrap_or(expiry)
}
