//! Failover email service
//!
//! Sends through a primary provider and fails over to a backup when the
//! primary errors. After a primary failure the backup is used until the
//! failover timeout has passed.

use async_trait::async_trait;
use raseed_core::services::verification::{EmailDelivery, EmailMessage};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::InfrastructureError;

#[derive(Debug, Clone, Default)]
struct FailoverState {
    using_backup: bool,
    last_primary_failure: Option<Instant>,
    primary_failure_count: u32,
}

/// Email service with automatic failover
pub struct FailoverEmailService {
    primary: Arc<dyn EmailDelivery>,
    backup: Arc<dyn EmailDelivery>,
    state: RwLock<FailoverState>,
    failover_timeout: Duration,
}

impl FailoverEmailService {
    /// Create a failover email service
    ///
    /// # Arguments
    ///
    /// * `primary` - Provider tried first
    /// * `backup` - Provider used when the primary fails
    /// * `failover_timeout` - How long to wait before retrying the primary
    pub fn new(
        primary: Arc<dyn EmailDelivery>,
        backup: Arc<dyn EmailDelivery>,
        failover_timeout: Duration,
    ) -> Self {
        info!(
            "Initializing failover email service with {} (primary) and {} (backup)",
            primary.provider_name(),
            backup.provider_name()
        );

        Self {
            primary,
            backup,
            state: RwLock::new(FailoverState::default()),
            failover_timeout,
        }
    }

    async fn should_retry_primary(&self) -> bool {
        let state = self.state.read().await;
        if !state.using_backup {
            return true;
        }
        state
            .last_primary_failure
            .map_or(true, |at| at.elapsed() > self.failover_timeout)
    }

    async fn record_primary_failure(&self) {
        let mut state = self.state.write().await;
        state.primary_failure_count += 1;
        state.last_primary_failure = Some(Instant::now());

        if !state.using_backup {
            warn!(
                "Primary email service ({}) failed, switching to backup ({})",
                self.primary.provider_name(),
                self.backup.provider_name()
            );
            state.using_backup = true;
        }
    }

    async fn record_primary_success(&self) {
        let mut state = self.state.write().await;
        if state.using_backup {
            info!(
                "Primary email service ({}) recovered, switching back from backup",
                self.primary.provider_name()
            );
        }
        *state = FailoverState::default();
    }

    /// Whether messages currently go to the backup
    pub async fn is_using_backup(&self) -> bool {
        self.state.read().await.using_backup
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        if self.should_retry_primary().await {
            match self.primary.send_email(message).await {
                Ok(message_id) => {
                    self.record_primary_success().await;
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        "Primary email service ({}) failed: {}",
                        self.primary.provider_name(),
                        e
                    );
                    self.record_primary_failure().await;
                }
            }
        }

        info!(
            "Using backup email service ({}) to send message",
            self.backup.provider_name()
        );

        self.backup.send_email(message).await.map_err(|e| {
            error!(
                "Backup email service ({}) also failed: {}",
                self.backup.provider_name(),
                e
            );
            InfrastructureError::Email(format!(
                "Both primary and backup email services failed. Primary: {}, Backup: {}",
                self.primary.provider_name(),
                self.backup.provider_name()
            ))
        })
    }
}

#[async_trait]
impl EmailDelivery for FailoverEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        self.send(message).await.map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        "failover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::ConsoleEmailService;

    fn message() -> EmailMessage {
        EmailMessage::verification("a@x.com", "482913", None, 10, "Raseed")
    }

    #[tokio::test]
    async fn test_failover_to_backup() {
        let primary = ConsoleEmailService::with_options(false, true);
        let backup = ConsoleEmailService::with_options(false, false);
        let service = FailoverEmailService::new(
            Arc::new(primary),
            Arc::new(backup.clone()),
            Duration::from_secs(30),
        );

        let result = service.send(&message()).await;

        assert!(result.is_ok());
        assert!(service.is_using_backup().await);
        assert_eq!(backup.message_count(), 1);
    }

    #[tokio::test]
    async fn test_backup_used_until_timeout() {
        let primary = ConsoleEmailService::with_options(false, true);
        let backup = ConsoleEmailService::with_options(false, false);
        let service = FailoverEmailService::new(
            Arc::new(primary.clone()),
            Arc::new(backup.clone()),
            Duration::from_secs(30),
        );

        service.send(&message()).await.unwrap();
        primary.set_simulate_failure(false);
        service.send(&message()).await.unwrap();

        assert_eq!(primary.message_count(), 0);
        assert_eq!(backup.message_count(), 2);
    }

    #[tokio::test]
    async fn test_primary_recovery() {
        let primary = ConsoleEmailService::with_options(false, false);
        let backup = ConsoleEmailService::with_options(false, false);
        let service = FailoverEmailService::new(
            Arc::new(primary.clone()),
            Arc::new(backup),
            Duration::from_millis(100),
        );

        {
            let mut state = service.state.write().await;
            state.using_backup = true;
            state.last_primary_failure = Some(Instant::now() - Duration::from_secs(1));
        }

        service.send(&message()).await.unwrap();

        assert!(!service.is_using_backup().await);
        assert_eq!(primary.message_count(), 1);
    }

    #[tokio::test]
    async fn test_both_services_fail() {
        let service = FailoverEmailService::new(
            Arc::new(ConsoleEmailService::with_options(false, true)),
            Arc::new(ConsoleEmailService::with_options(false, true)),
            Duration::from_secs(30),
        );

        let result = service.send(&message()).await;

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Both primary and backup"));
    }
}
