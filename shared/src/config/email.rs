//! Email delivery configuration

use serde::{Deserialize, Serialize};

use super::{env_non_empty, env_parse};

/// Default EmailJS REST endpoint
pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Email delivery provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log messages instead of sending them (demo mode)
    #[default]
    Console,
    /// Send through the EmailJS REST API
    EmailJs,
    /// EmailJS with the console as backup
    Failover,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "demo" | "mock" => Ok(EmailProvider::Console),
            "emailjs" => Ok(EmailProvider::EmailJs),
            "failover" => Ok(EmailProvider::Failover),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider used for the local fallback path
    #[serde(default)]
    pub provider: EmailProvider,

    /// EmailJS service id
    #[serde(default)]
    pub service_id: Option<String>,

    /// EmailJS template id
    #[serde(default)]
    pub template_id: Option<String>,

    /// EmailJS public key
    #[serde(default)]
    pub public_key: Option<String>,

    /// EmailJS endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seconds to keep using the backup after a primary failure
    #[serde(default = "default_failover_timeout")]
    pub failover_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            service_id: None,
            template_id: None,
            public_key: None,
            api_url: default_api_url(),
            failover_timeout_secs: default_failover_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env_non_empty("EMAIL_PROVIDER")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.provider),
            service_id: env_non_empty("EMAILJS_SERVICE_ID"),
            template_id: env_non_empty("EMAILJS_TEMPLATE_ID"),
            public_key: env_non_empty("EMAILJS_PUBLIC_KEY"),
            api_url: env_non_empty("EMAILJS_API_URL").unwrap_or(defaults.api_url),
            failover_timeout_secs: env_parse("EMAIL_FAILOVER_TIMEOUT_SECS")
                .unwrap_or(defaults.failover_timeout_secs),
        }
    }

    /// Whether all EmailJS credentials are present
    pub fn is_emailjs_configured(&self) -> bool {
        self.service_id.is_some() && self.template_id.is_some() && self.public_key.is_some()
    }
}

fn default_api_url() -> String {
    String::from(EMAILJS_SEND_URL)
}

fn default_failover_timeout() -> u64 {
    30
}
