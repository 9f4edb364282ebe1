//! Verification service module for email-based two-factor authentication
//!
//! A remote authority owns code generation when reachable. When it is not,
//! the local authority issues codes, persists the single verification record
//! and dispatches the email itself.

mod chain;
mod clock;
mod config;
mod email;
mod local;
mod manager;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use chain::{Answered, AuthorityChain};
pub use clock::{ManualClock, SystemClock};
pub use config::VerificationServiceConfig;
pub use email::{extract_code, EmailMessage, DEFAULT_DISPLAY_NAME};
pub use local::LocalVerificationAuthority;
pub use manager::VerificationManager;
pub use traits::{Clock, EmailDelivery, KeyValueStore, VerificationAuthority};
pub use types::{SendPurpose, VerificationState};
