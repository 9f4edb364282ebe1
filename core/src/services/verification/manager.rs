//! Verification code manager: remote authority first, local fallback second

use chrono::Duration;
use raseed_shared::utils::{mask_email, normalize_email};
use std::sync::Arc;

use crate::domain::value_objects::{AuthorityKind, DeliveryToken};
use crate::errors::{DomainResult, VerificationError};

use super::chain::AuthorityChain;
use super::local::LocalVerificationAuthority;
use super::traits::VerificationAuthority;
use super::types::{SendPurpose, VerificationState};

/// Entry point used by the authentication front
///
/// Constructed explicitly with its authorities; there is no process-wide
/// instance. Share it behind an `Arc`.
pub struct VerificationManager {
    chain: AuthorityChain,
    local: Arc<LocalVerificationAuthority>,
}

impl VerificationManager {
    /// Local-only manager
    pub fn new(local: Arc<LocalVerificationAuthority>) -> Self {
        let chain = AuthorityChain::new(vec![local.clone() as Arc<dyn VerificationAuthority>]);
        Self { chain, local }
    }

    /// Manager that prefers `remote` and falls back to `local`
    pub fn with_remote(
        remote: Arc<dyn VerificationAuthority>,
        local: Arc<LocalVerificationAuthority>,
    ) -> Self {
        let chain = AuthorityChain::new(vec![remote, local.clone() as Arc<dyn VerificationAuthority>]);
        Self { chain, local }
    }

    /// Whether a remote authority is part of the chain
    pub fn has_remote(&self) -> bool {
        self.chain.contains(AuthorityKind::Remote)
    }

    /// Validity window of locally issued codes
    pub fn code_expiry(&self) -> Duration {
        self.local.config().code_expiry
    }

    /// Send a verification code to `email`
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveryToken)` - Acknowledgment from whichever authority sent the code
    /// * `Err(DomainError)` - Invalid email, delivery failure or storage failure
    pub async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> DomainResult<DeliveryToken> {
        self.dispatch(email, display_name, SendPurpose::Initial).await
    }

    /// Send another code; same contract as [`VerificationManager::send_code`]
    pub async fn resend_code(
        &self,
        email: &str,
        display_name: Option<&str>,
    ) -> DomainResult<DeliveryToken> {
        self.dispatch(email, display_name, SendPurpose::Resend).await
    }

    async fn dispatch(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> DomainResult<DeliveryToken> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(VerificationError::InvalidEmail { email }.into());
        }

        let answer = self.chain.send_code(&email, display_name, purpose).await?;

        // A remote-issued code supersedes any locally issued one
        if answer.authority == AuthorityKind::Remote {
            self.local.clear().await;
        }

        tracing::info!(
            email = %mask_email(&email),
            authority = %answer.authority,
            purpose = ?purpose,
            event = "verification_code_sent",
            "Verification code dispatched"
        );
        Ok(answer.value)
    }

    /// Check an entered code for `email`
    ///
    /// Returns `Ok(false)` for a wrong, foreign or expired code. The entered
    /// code is compared as given; surrounding whitespace makes it malformed.
    /// A `false` from the remote authority still consults the local record,
    /// which only exists when the code was issued locally.
    pub async fn verify_code(&self, entered_code: &str, email: &str) -> DomainResult<bool> {
        let email = normalize_email(email);

        let answer = self.chain.verify_code(&email, entered_code).await?;

        if answer.value && answer.authority == AuthorityKind::Remote {
            if let Err(e) = self.local.persist_remote_verified(&email).await {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "remote_verified_persist_failed",
                    "Remote verification succeeded but local marker was not stored"
                );
            }
        }

        Ok(answer.value)
    }

    /// Like [`VerificationManager::verify_code`] but a rejected code is an error
    pub async fn confirm_code(&self, entered_code: &str, email: &str) -> DomainResult<()> {
        if self.verify_code(entered_code, email).await? {
            Ok(())
        } else {
            Err(VerificationError::ValidationFailed.into())
        }
    }

    /// Whether `email` has completed verification
    pub async fn is_verified(&self, email: &str) -> bool {
        let email = normalize_email(email);
        match self.chain.check_status(&email).await {
            Ok(answer) => answer.value,
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "status_check_failed",
                    "Verification status unavailable"
                );
                false
            }
        }
    }

    /// Remove the locally persisted record (sign-out)
    pub async fn clear(&self) {
        self.local.clear().await;
    }

    /// Remaining validity of the locally persisted record, for display
    pub async fn time_remaining(&self) -> Duration {
        self.local.time_remaining().await
    }

    /// Locally derived verification state for `email`
    pub async fn state(&self, email: &str) -> VerificationState {
        self.local.state(&normalize_email(email)).await
    }
}
