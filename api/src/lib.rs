//! # Raseed API
//!
//! `actix-web` surface for the two-factor email verification flow. The UI
//! requests a code, submits it, polls status and signs out through these
//! endpoints.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::auth::AppState;
