//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `email` - Email delivery provider used by the local fallback
//! - `environment` - Environment detection and logging configuration
//! - `remote` - Remote verification authority endpoints
//! - `server` - HTTP server configuration
//! - `storage` - Key-value persistence for the verification record
//! - `verification` - Code expiry and storage key

pub mod email;
pub mod environment;
pub mod remote;
pub mod server;
pub mod storage;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use remote::RemoteAuthorityConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use verification::{VerificationConfig, DEFAULT_STORAGE_KEY};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Verification code settings
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Remote authority endpoints (absent means local-only operation)
    #[serde(default)]
    pub remote: RemoteAuthorityConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Record persistence configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            verification: VerificationConfig::default(),
            remote: RemoteAuthorityConfig::default(),
            email: EmailConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Every section falls back to its defaults when its variables are unset.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let logging = LoggingConfig::from_env(environment);

        Self {
            environment,
            server: ServerConfig::from_env(),
            verification: VerificationConfig::from_env(),
            remote: RemoteAuthorityConfig::from_env(),
            email: EmailConfig::from_env(),
            storage: StorageConfig::from_env(),
            logging,
        }
    }
}

/// Read an environment variable and parse it, ignoring unset or malformed values
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Read a non-empty environment variable
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
