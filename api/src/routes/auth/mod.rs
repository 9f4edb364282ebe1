//! Authentication route handlers
//!
//! This module contains the two-factor verification endpoints:
//! - Sending and resending codes
//! - Verifying codes
//! - Status and remaining validity
//! - Sign-out

use raseed_core::services::verification::VerificationManager;
use std::sync::Arc;

pub mod resend_code;
pub mod send_code;
pub mod sign_out;
pub mod status;
pub mod time_remaining;
pub mod verify_code;

pub use resend_code::resend_code;
pub use send_code::send_code;
pub use sign_out::sign_out;
pub use status::status;
pub use time_remaining::time_remaining;
pub use verify_code::verify_code;

/// Application state that holds shared services
pub struct AppState {
    pub manager: Arc<VerificationManager>,
}

impl AppState {
    pub fn new(manager: Arc<VerificationManager>) -> Self {
        Self { manager }
    }
}
