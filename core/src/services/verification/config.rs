//! Configuration for the verification manager

use chrono::Duration;
use raseed_shared::config::{VerificationConfig, DEFAULT_STORAGE_KEY};

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification manager and the local authority
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// How long an issued code stays valid
    pub code_expiry: Duration,
    /// Storage key of the single verification record
    pub storage_key: String,
    /// Product name used in verification emails
    pub app_name: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiry: Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            app_name: "Raseed".to_string(),
        }
    }
}

impl VerificationServiceConfig {
    /// Expiry in whole minutes, as shown in verification emails
    pub fn expiry_minutes(&self) -> i64 {
        self.code_expiry.num_minutes()
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiry: Duration::minutes(config.code_expiry_minutes),
            storage_key: config.storage_key.clone(),
            app_name: config.app_name.clone(),
        }
    }
}
