//! Verification code configuration

use serde::{Deserialize, Serialize};

use super::{env_non_empty, env_parse};

/// Key under which the single verification record is persisted
pub const DEFAULT_STORAGE_KEY: &str = "raseed_2fa_codes";

/// Verification code settings shared by the local fallback and the API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes an issued code stays valid
    #[serde(default = "default_expiry_minutes")]
    pub code_expiry_minutes: i64,

    /// Storage key of the verification record
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Product name used in verification emails
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiry_minutes: default_expiry_minutes(),
            storage_key: default_storage_key(),
            app_name: default_app_name(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_expiry_minutes: env_parse::<i64>("VERIFICATION_CODE_EXPIRY_MINUTES")
                .filter(|m| *m > 0)
                .unwrap_or(defaults.code_expiry_minutes),
            storage_key: env_non_empty("VERIFICATION_STORAGE_KEY").unwrap_or(defaults.storage_key),
            app_name: env_non_empty("APP_NAME").unwrap_or(defaults.app_name),
        }
    }
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_storage_key() -> String {
    String::from(DEFAULT_STORAGE_KEY)
}

fn default_app_name() -> String {
    String::from("Raseed")
}
