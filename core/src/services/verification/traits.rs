//! Traits at the seams of the verification manager

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AuthorityKind, DeliveryToken};
use crate::errors::VerificationError;

use super::email::EmailMessage;
use super::types::SendPurpose;

/// A strategy able to dispatch and validate verification codes
///
/// The manager tries authorities in order. Returning
/// [`VerificationError::NetworkUnavailable`] or
/// [`VerificationError::RemoteRejected`] hands the request to the next one.
#[async_trait]
pub trait VerificationAuthority: Send + Sync {
    /// Which kind of authority this is
    fn kind(&self) -> AuthorityKind;

    /// Name used in logs
    fn name(&self) -> &str;

    /// Issue and dispatch a code for `email`
    async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> Result<DeliveryToken, VerificationError>;

    /// Check an entered code
    async fn verify_code(&self, email: &str, code: &str) -> Result<bool, VerificationError>;

    /// Whether `email` has completed verification
    async fn check_status(&self, email: &str) -> Result<bool, VerificationError>;
}

/// Trait for key-value persistence of the verification record
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Remove `key`; removing a missing key succeeds
    async fn remove(&self, key: &str) -> Result<(), String>;
}

/// Trait for email delivery integration
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    /// Send a message, returning the provider message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String>;
    /// Provider name used in logs and delivery tokens
    fn provider_name(&self) -> &str;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
