//! User identity handed over by the identity store after authentication.

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// An authenticated user as supplied by the external identity store
///
/// Only the fields that end up inside a token are carried here. Lookup,
/// password checks and persistence happen before this value is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Login name, becomes the token subject
    pub username: String,

    /// Numeric user identifier
    pub id: i64,

    /// Granted role/permission strings, in grant order
    pub authorities: Vec<String>,
}

impl UserIdentity {
    /// Creates a new user identity
    pub fn new<I, S>(username: impl Into<String>, id: i64, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            id,
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks that the identity can be put into a token
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The identity is usable
    /// * `Err(DomainError::Validation)` - The username is empty or blank
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "username must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collects_authorities_in_order() {
        let user = UserIdentity::new("alice", 42, ["ROLE_USER", "ROLE_ADMIN"]);
        assert_eq!(user.username, "alice");
        assert_eq!(user.id, 42);
        assert_eq!(user.authorities, vec!["ROLE_USER", "ROLE_ADMIN"]);
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let user = UserIdentity::new("  ", 1, Vec::<String>::new());
        assert!(matches!(user.validate(), Err(DomainError::Validation { .. })));
    }
}
