//! Local fallback authority: key-value persistence plus direct email dispatch

use async_trait::async_trait;
use chrono::Duration;
use raseed_shared::utils::mask_email;
use std::sync::Arc;

use crate::domain::entities::VerificationRecord;
use crate::domain::value_objects::{AuthorityKind, DeliveryToken};
use crate::errors::VerificationError;

use super::clock::SystemClock;
use super::config::VerificationServiceConfig;
use super::email::EmailMessage;
use super::traits::{Clock, EmailDelivery, KeyValueStore, VerificationAuthority};
use super::types::{SendPurpose, VerificationState};

/// Issues, persists and validates codes without the backend
///
/// Exactly one record is kept under the configured storage key. Issuing a
/// code for any email overwrites it.
pub struct LocalVerificationAuthority {
    store: Arc<dyn KeyValueStore>,
    mailer: Arc<dyn EmailDelivery>,
    clock: Arc<dyn Clock>,
    config: VerificationServiceConfig,
}

impl LocalVerificationAuthority {
    /// Create a local authority using the system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Persistence for the verification record
    /// * `mailer` - Email delivery used to dispatch codes
    /// * `config` - Expiry, storage key and app name
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        mailer: Arc<dyn EmailDelivery>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self::with_clock(store, mailer, Arc::new(SystemClock), config)
    }

    pub fn with_clock(
        store: Arc<dyn KeyValueStore>,
        mailer: Arc<dyn EmailDelivery>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            store,
            mailer,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Generate, persist and email a fresh code
    ///
    /// The record is written before delivery. If delivery fails the record
    /// stays and expires unused.
    pub async fn issue(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> Result<DeliveryToken, VerificationError> {
        if email.trim().is_empty() {
            return Err(VerificationError::InvalidEmail {
                email: email.to_string(),
            });
        }

        let now = self.clock.now();
        let record = VerificationRecord::new(email, now);
        self.save_record(&record).await?;

        tracing::info!(
            email = %mask_email(email),
            purpose = ?purpose,
            event = "local_code_issued",
            "Generated verification code locally"
        );

        let message = EmailMessage::verification(
            email,
            &record.code,
            display_name,
            self.config.expiry_minutes(),
            &self.config.app_name,
        );

        let message_id = self.mailer.send_email(&message).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                provider = self.mailer.provider_name(),
                error = %e,
                event = "code_delivery_failed",
                "Failed to send verification email"
            );
            VerificationError::DeliveryFailed(e)
        })?;

        tracing::info!(
            email = %mask_email(email),
            provider = self.mailer.provider_name(),
            message_id = %message_id,
            event = "code_delivered",
            "Verification email sent"
        );

        Ok(DeliveryToken::local(message_id, now))
    }

    /// Compare an entered code against the persisted record
    ///
    /// A match marks the record verified. Malformed codes, missing records,
    /// another email's record and expired records all yield `false`.
    pub async fn verify(&self, email: &str, code: &str) -> Result<bool, VerificationError> {
        if !VerificationRecord::is_well_formed_code(code) {
            tracing::warn!(
                email = %mask_email(email),
                code_length = code.len(),
                event = "invalid_code_format",
                "Invalid verification code format provided"
            );
            return Ok(false);
        }

        let Some(mut record) = self.load_record().await else {
            tracing::warn!(
                email = %mask_email(email),
                event = "no_code_on_record",
                "No verification code on record"
            );
            return Ok(false);
        };

        let now = self.clock.now();
        if !record.matches(code, email, now, self.config.code_expiry) {
            tracing::warn!(
                email = %mask_email(email),
                expired = record.is_expired_at(now, self.config.code_expiry),
                event = "otp_verification_failed",
                "Verification code rejected"
            );
            return Ok(false);
        }

        record.mark_verified();
        self.save_record(&record).await?;

        tracing::info!(
            email = %mask_email(email),
            event = "otp_verified_success",
            "Verification code successfully verified"
        );
        Ok(true)
    }

    /// Whether the persisted record proves `email` verified
    pub async fn is_verified(&self, email: &str) -> bool {
        self.load_record()
            .await
            .map(|record| {
                record.is_verified_for(email, self.clock.now(), self.config.code_expiry)
            })
            .unwrap_or(false)
    }

    /// Remove the persisted record; failures are logged and swallowed
    pub async fn clear(&self) {
        match self.store.remove(&self.config.storage_key).await {
            Ok(()) => tracing::info!(event = "clear_verification", "Cleared verification record"),
            Err(e) => tracing::warn!(
                error = %e,
                event = "clear_verification_failed",
                "Failed to clear verification record"
            ),
        }
    }

    /// Remaining validity of the persisted record; zero when absent
    pub async fn time_remaining(&self) -> Duration {
        self.load_record()
            .await
            .map(|record| record.time_remaining_at(self.clock.now(), self.config.code_expiry))
            .unwrap_or_else(Duration::zero)
    }

    /// Derive the verification state for `email`
    pub async fn state(&self, email: &str) -> VerificationState {
        let Some(record) = self.load_record().await else {
            return VerificationState::NoCode;
        };
        if record.email != email {
            return VerificationState::NoCode;
        }
        if record.is_expired_at(self.clock.now(), self.config.code_expiry) {
            VerificationState::Expired
        } else if record.verified {
            VerificationState::Verified
        } else {
            VerificationState::Pending
        }
    }

    /// Record that the remote authority confirmed `email`
    pub async fn persist_remote_verified(&self, email: &str) -> Result<(), VerificationError> {
        let record = VerificationRecord::remote_verified(email, self.clock.now());
        self.save_record(&record).await
    }

    async fn load_record(&self) -> Option<VerificationRecord> {
        let raw = match self.store.get(&self.config.storage_key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    event = "record_read_failed",
                    "Failed to read verification record, treating as absent"
                );
                return None;
            }
        };

        let record = VerificationRecord::from_json(&raw);
        if record.is_none() {
            tracing::warn!(event = "record_malformed", "Ignoring malformed verification record");
        }
        record
    }

    async fn save_record(&self, record: &VerificationRecord) -> Result<(), VerificationError> {
        let json = record
            .to_json()
            .map_err(|e| VerificationError::Storage(e.to_string()))?;

        self.store
            .set(&self.config.storage_key, &json)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    event = "record_write_failed",
                    "Failed to store verification record"
                );
                VerificationError::Storage(e)
            })
    }
}

#[async_trait]
impl VerificationAuthority for LocalVerificationAuthority {
    fn kind(&self) -> AuthorityKind {
        AuthorityKind::Local
    }

    fn name(&self) -> &str {
        "local"
    }

    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> Result<DeliveryToken, VerificationError> {
        self.issue(email, display_name, purpose).await
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, VerificationError> {
        self.verify(email, code).await
    }

    async fn check_status(&self, email: &str) -> Result<bool, VerificationError> {
        Ok(self.is_verified(email).await)
    }
}
