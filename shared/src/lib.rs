//! Shared utilities and common types for the Raseed services
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email validation and masking)
//! - Health check response

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, EmailConfig, EmailProvider, Environment, LoggingConfig, RemoteAuthorityConfig,
    ServerConfig, StorageBackend, StorageConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus};
