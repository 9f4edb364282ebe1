//! Console email service (demo mode)
//!
//! Prints verification emails instead of sending them. Used when no email
//! provider is configured and by tests, which read codes from the outbox.

use async_trait::async_trait;
use raseed_core::services::verification::{EmailDelivery, EmailMessage};
use raseed_shared::utils::mask_email;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::InfrastructureError;

/// Console email service for development and testing
///
/// This implementation:
/// - Prints messages to the console
/// - Keeps every sent message in an in-memory outbox
/// - Generates `console_` message ids
/// - Can simulate delivery failures
#[derive(Clone)]
pub struct ConsoleEmailService {
    message_count: Arc<AtomicU64>,
    outbox: Arc<Mutex<Vec<EmailMessage>>>,
    simulate_failure: Arc<AtomicBool>,
    console_output: bool,
}

impl ConsoleEmailService {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a console service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Copy of every message sent so far
    pub fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most recent message sent to `email`
    pub fn last_message_to(&self, email: &str) -> Option<EmailMessage> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|m| m.to_email == email)
            .cloned()
    }

    /// Code carried by the most recent message to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.last_message_to(email).and_then(|m| m.code())
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to_email);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(email = %masked, "Console email service simulating failure");
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("console_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("CONSOLE EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} <{}>", message.to_name, message.to_email);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", message.text_body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "console",
            email = %masked,
            message_id = %message_id,
            "Email sent successfully (console)"
        );

        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        Ok(message_id)
    }
}

impl Default for ConsoleEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailDelivery for ConsoleEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        self.send(message).await.map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage::verification("a@x.com", "482913", Some("Alice"), 10, "Raseed")
    }

    #[tokio::test]
    async fn test_console_send_success() {
        let service = ConsoleEmailService::with_options(false, false);

        let message_id = service.send(&message()).await.unwrap();

        assert!(message_id.starts_with("console_"));
        assert_eq!(service.message_count(), 1);
        assert_eq!(service.last_code_for("a@x.com").as_deref(), Some("482913"));
        assert!(service.last_code_for("b@other.com").is_none());
    }

    #[tokio::test]
    async fn test_console_simulate_failure() {
        let service = ConsoleEmailService::with_options(false, true);

        let result = service.send_email(&message()).await;

        assert!(result.unwrap_err().contains("Simulated"));
        assert_eq!(service.message_count(), 0);
        assert!(service.outbox().is_empty());

        service.set_simulate_failure(false);
        assert!(service.send_email(&message()).await.is_ok());
    }

    #[tokio::test]
    async fn test_clones_share_outbox() {
        let service = ConsoleEmailService::with_options(false, false);
        let handle = service.clone();

        service.send(&message()).await.unwrap();

        assert_eq!(handle.outbox().len(), 1);
    }
}
