//! Verification record entity for email-based two-factor authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Default validity window for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// The single persisted verification record
///
/// Serialized as `{"code", "email", "issuedAt", "verified"}` with `issuedAt`
/// in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// The 6-digit verification code (empty for remote-verified markers)
    pub code: String,

    /// Email address the code was issued for
    pub email: String,

    /// When the code was generated
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub issued_at: DateTime<Utc>,

    /// Whether a matching code has been accepted
    pub verified: bool,
}

impl VerificationRecord {
    /// Creates a pending record with a freshly generated code
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code is issued for
    /// * `issued_at` - Generation timestamp
    pub fn new(email: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self::with_code(email, Self::generate_code(), issued_at)
    }

    /// Creates a pending record with a known code
    pub fn with_code(
        email: impl Into<String>,
        code: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code: code.into(),
            email: email.into(),
            issued_at,
            verified: false,
        }
    }

    /// Creates an already-verified marker for a code confirmed by the remote authority
    ///
    /// The code is left empty, so the marker can never be matched by
    /// [`VerificationRecord::matches`].
    pub fn remote_verified(email: impl Into<String>, verified_at: DateTime<Utc>) -> Self {
        Self {
            code: String::new(),
            email: email.into(),
            issued_at: verified_at,
            verified: true,
        }
    }

    /// Generates a random code uniformly distributed over [`CODE_MIN`, `CODE_MAX`]
    ///
    /// Uses the OS-provided CSPRNG.
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks that a candidate code is exactly six ASCII digits
    pub fn is_well_formed_code(code: &str) -> bool {
        code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
    }

    /// Time elapsed since issuance
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Checks if the record is outside its validity window
    ///
    /// A record is valid while `now - issued_at < expiry`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, expiry: Duration) -> bool {
        self.elapsed(now) >= expiry
    }

    /// Remaining validity, clamped to `[0, expiry]`
    pub fn time_remaining_at(&self, now: DateTime<Utc>, expiry: Duration) -> Duration {
        let remaining = expiry - self.elapsed(now);
        if remaining <= Duration::zero() {
            Duration::zero()
        } else {
            remaining.min(expiry)
        }
    }

    /// Checks an entered code against this record
    ///
    /// Requires an exact code match, an exact email match and an unexpired
    /// record. The code comparison runs in constant time.
    pub fn matches(
        &self,
        entered_code: &str,
        email: &str,
        now: DateTime<Utc>,
        expiry: Duration,
    ) -> bool {
        let code_matches = Self::is_well_formed_code(entered_code)
            && self.code.len() == entered_code.len()
            && constant_time_eq(self.code.as_bytes(), entered_code.as_bytes());

        code_matches && self.email == email && !self.is_expired_at(now, expiry)
    }

    /// Checks whether this record proves `email` verified at `now`
    pub fn is_verified_for(&self, email: &str, now: DateTime<Utc>, expiry: Duration) -> bool {
        self.verified && self.email == email && !self.is_expired_at(now, expiry)
    }

    /// Marks the record as verified
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Serializes the record for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a stored record; malformed input yields `None`
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
