//! # Raseed Core
//!
//! Core domain layer for the Raseed two-factor email verification flow.
//! This crate contains the verification record entity, the error taxonomy,
//! the verification manager with its remote-then-local authority chain, and
//! the traits that infrastructure implements (remote transport, key-value
//! storage, email delivery, clock).

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
