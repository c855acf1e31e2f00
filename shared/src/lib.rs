//! Shared configuration types for the SealToken workspace
//!
//! This crate provides the configuration consumed by the token core:
//! - Token lifetime, keystore and envelope secret settings
//! - Deployment environment, default-secret policy and logging configuration

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, TokenConfig};
