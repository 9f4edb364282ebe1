//! Remote verification authority configuration

use serde::{Deserialize, Serialize};

use super::{env_non_empty, env_parse};

/// Endpoints of the backend that owns code generation when reachable
///
/// Paths are joined onto `base_url`. When `base_url` is `None` the services
/// run in local-only mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteAuthorityConfig {
    /// Backend base URL, e.g. `https://api.raseed.app`
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_send_path")]
    pub send_path: String,

    #[serde(default = "default_verify_path")]
    pub verify_path: String,

    #[serde(default = "default_status_path")]
    pub status_path: String,

    #[serde(default = "default_resend_path")]
    pub resend_path: String,

    /// Optional request timeout; the transport default applies when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for RemoteAuthorityConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            send_path: default_send_path(),
            verify_path: default_verify_path(),
            status_path: default_status_path(),
            resend_path: default_resend_path(),
            request_timeout_secs: None,
        }
    }
}

impl RemoteAuthorityConfig {
    /// Create a configuration pointing at `base_url` with default paths
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_non_empty("VERIFICATION_API_URL"),
            send_path: env_non_empty("VERIFICATION_SEND_PATH").unwrap_or(defaults.send_path),
            verify_path: env_non_empty("VERIFICATION_VERIFY_PATH").unwrap_or(defaults.verify_path),
            status_path: env_non_empty("VERIFICATION_STATUS_PATH").unwrap_or(defaults.status_path),
            resend_path: env_non_empty("VERIFICATION_RESEND_PATH").unwrap_or(defaults.resend_path),
            request_timeout_secs: env_parse("VERIFICATION_API_TIMEOUT_SECS"),
        }
    }

    /// Whether a remote authority is configured
    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Build the absolute URL for one of the configured paths
    pub fn endpoint(&self, path: &str) -> Option<String> {
        self.base_url.as_ref().map(|base| {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        })
    }
}

fn default_send_path() -> String {
    String::from("/api/auth/send-verification")
}

fn default_verify_path() -> String {
    String::from("/api/auth/verify-code")
}

fn default_status_path() -> String {
    String::from("/api/auth/verification-status")
}

fn default_resend_path() -> String {
    String::from("/api/auth/resend-verification")
}
