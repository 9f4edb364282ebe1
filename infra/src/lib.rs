//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `raseed_core`:
//!
//! - **Remote**: HTTP client for the backend verification endpoints
//! - **Storage**: key-value back ends for the verification record (memory,
//!   JSON file, Redis)
//! - **Email**: verification email delivery (EmailJS, console demo mode,
//!   failover between the two)
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis storage back end (default)

use std::sync::Arc;

use raseed_core::services::verification::{
    LocalVerificationAuthority, VerificationManager, VerificationServiceConfig,
};
use raseed_shared::config::AppConfig;

// Re-export core types for convenience
pub use raseed_core::errors::*;

/// Remote verification authority over HTTP
pub mod remote;

/// Email delivery providers
pub mod email;

/// Key-value storage back ends
pub mod storage;

/// Build the verification manager described by `config`
///
/// Sets up:
/// - The storage back end for the verification record
/// - The email delivery provider used by the local fallback
/// - The remote authority, when a backend URL is configured
pub async fn initialize(config: &AppConfig) -> Result<Arc<VerificationManager>, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let store = storage::create_store(&config.storage).await?;
    let mailer = email::create_email_service(&config.email);

    let local = Arc::new(LocalVerificationAuthority::new(
        store,
        mailer,
        VerificationServiceConfig::from(&config.verification),
    ));

    let manager = if config.remote.is_enabled() {
        let remote = remote::RemoteVerificationAuthority::new(config.remote.clone())?;
        tracing::info!(
            base_url = remote.base_url(),
            "Remote verification authority enabled"
        );
        VerificationManager::with_remote(Arc::new(remote), local)
    } else {
        tracing::info!("No remote verification authority configured, running local-only");
        VerificationManager::new(local)
    };

    tracing::info!("Infrastructure services initialized successfully");

    Ok(Arc::new(manager))
}

/// Load application configuration from the environment
///
/// Reads a `.env` file first when one is present.
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();
    AppConfig::from_env()
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage back end error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for InfrastructureError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::Storage(err.to_string())
    }
}
