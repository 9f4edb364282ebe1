//! Acknowledgment returned when a verification code has been dispatched

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which authority handled a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorityKind {
    /// Backend verification endpoint
    Remote,
    /// Local persistence plus direct email dispatch
    Local,
}

impl AuthorityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityKind::Remote => "remote",
            AuthorityKind::Local => "local",
        }
    }
}

impl fmt::Display for AuthorityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque delivery acknowledgment
///
/// Never carries the verification code itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryToken {
    /// Authority that dispatched the code
    pub authority: AuthorityKind,
    /// Remote acknowledgment message or email provider message id
    pub reference: String,
    /// When the acknowledgment was produced
    pub issued_at: DateTime<Utc>,
}

impl DeliveryToken {
    /// Acknowledgment from the remote authority
    pub fn remote(message: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            authority: AuthorityKind::Remote,
            reference: message.into(),
            issued_at,
        }
    }

    /// Acknowledgment from the local fallback
    pub fn local(message_id: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            authority: AuthorityKind::Local,
            reference: message_id.into(),
            issued_at,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.authority == AuthorityKind::Remote
    }
}
