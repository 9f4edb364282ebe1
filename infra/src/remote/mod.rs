//! Remote verification authority
//!
//! Talks to the backend endpoints that own code generation and validation
//! when reachable. Transport failures and non-success answers are reported
//! as fallback-class errors so the manager can demote to the local path.

mod client;
mod types;

pub use client::RemoteVerificationAuthority;
pub use types::{
    RemoteErrorBody, RemoteMessageResponse, RemoteSendRequest, RemoteStatusRequest,
    RemoteVerifiedResponse, RemoteVerifyRequest,
};
