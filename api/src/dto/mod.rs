//! Request and response bodies

pub mod auth;

pub use raseed_shared::errors::ErrorResponse;
