//! Types shared by the verification authorities

use serde::{Deserialize, Serialize};

/// Why a code is being dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPurpose {
    /// First code for this sign-in
    Initial,
    /// User asked for another code
    Resend,
}

/// Verification state derived from the persisted record for one email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    /// No record, or the record belongs to another email
    NoCode,
    /// Code issued and still inside its validity window
    Pending,
    /// Code accepted and still inside its validity window
    Verified,
    /// Validity window has passed; equivalent to `NoCode` for validation
    Expired,
}

impl VerificationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::NoCode => "no_code",
            VerificationState::Pending => "pending",
            VerificationState::Verified => "verified",
            VerificationState::Expired => "expired",
        }
    }
}
