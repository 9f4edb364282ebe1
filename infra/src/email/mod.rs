//! Email Delivery Module
//!
//! Providers used by the local fallback to dispatch verification emails.
//!
//! ## Features
//!
//! - **Console**: demo mode printing messages, with an inspectable outbox
//! - **EmailJS**: production delivery through the EmailJS REST API
//! - **Failover**: EmailJS with the console as backup

use raseed_core::services::verification::EmailDelivery;
use raseed_shared::config::{EmailConfig, EmailProvider};
use std::sync::Arc;
use std::time::Duration;

pub mod console;
pub mod emailjs;
pub mod failover;

pub use console::ConsoleEmailService;
pub use emailjs::{EmailJsConfig, EmailJsService};
pub use failover::FailoverEmailService;


/// Create an email service based on configuration
///
/// EmailJS without complete credentials falls back to the console service
/// with a warning.
pub fn create_email_service(config: &EmailConfig) -> Arc<dyn EmailDelivery> {
    match config.provider {
        EmailProvider::Console => {
            tracing::info!("Email provider: console (demo mode)");
            Arc::new(ConsoleEmailService::new())
        }
        EmailProvider::EmailJs => match EmailJsConfig::from_email_config(config) {
            Some(emailjs) => {
                tracing::info!("Email provider: EmailJS");
                Arc::new(EmailJsService::new(emailjs))
            }
            None => {
                tracing::warn!("EmailJS credentials incomplete, falling back to console email service");
                Arc::new(ConsoleEmailService::new())
            }
        },
        EmailProvider::Failover => create_failover_email_service(config),
    }
}

/// EmailJS as primary with the console as backup
fn create_failover_email_service(config: &EmailConfig) -> Arc<dyn EmailDelivery> {
    let Some(emailjs) = EmailJsConfig::from_email_config(config) else {
        tracing::warn!("EmailJS credentials incomplete, failover has no primary; using console email service");
        return Arc::new(ConsoleEmailService::new());
    };

    Arc::new(FailoverEmailService::new(
        Arc::new(EmailJsService::new(emailjs)),
        Arc::new(ConsoleEmailService::new()),
        Duration::from_secs(config.failover_timeout_secs),
    ))
}
