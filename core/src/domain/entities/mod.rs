//! Domain entities representing identities and token claims.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{Authority, Claims};
pub use user::UserIdentity;
