//! Domain layer containing the entities carried inside tokens.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
