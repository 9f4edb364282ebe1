//! Error types for verification operations
//!
//! Remote failures are split out so the authority chain can decide whether
//! to fall back to the next authority.

use thiserror::Error;

/// Verification-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// The remote authority could not be reached
    #[error("Verification service unreachable: {0}")]
    NetworkUnavailable(String),

    /// The remote authority answered with a non-success status
    #[error("Verification service rejected the request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    /// The local fallback could not send the verification email
    #[error("Failed to deliver verification email: {0}")]
    DeliveryFailed(String),

    /// The entered code is wrong, for another email, or expired
    #[error("Invalid verification code")]
    ValidationFailed,

    #[error("Invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("Verification storage failure: {0}")]
    Storage(String),
}

impl VerificationError {
    /// Whether the next authority in the chain should be tried
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            VerificationError::NetworkUnavailable(_) | VerificationError::RemoteRejected { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_remote_failures_trigger_fallback() {
        assert!(VerificationError::NetworkUnavailable("refused".into()).triggers_fallback());
        assert!(VerificationError::RemoteRejected {
            status: 500,
            message: "boom".into()
        }
        .triggers_fallback());

        assert!(!VerificationError::DeliveryFailed("smtp".into()).triggers_fallback());
        assert!(!VerificationError::ValidationFailed.triggers_fallback());
        assert!(!VerificationError::Storage("disk full".into()).triggers_fallback());
    }

    #[test]
    fn test_validation_failed_message_hides_cause() {
        assert_eq!(
            VerificationError::ValidationFailed.to_string(),
            "Invalid verification code"
        );
    }
}
