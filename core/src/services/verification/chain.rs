//! Ordered chain of verification authorities

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::domain::value_objects::{AuthorityKind, DeliveryToken};
use crate::errors::VerificationError;

use super::traits::VerificationAuthority;
use super::types::SendPurpose;

/// An answer together with the authority that gave it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answered<T> {
    pub value: T,
    pub authority: AuthorityKind,
}

/// Tries each authority in order until one answers
///
/// Fallback-class errors move on to the next authority. Any other error is
/// returned immediately. For `verify_code` and `check_status` a negative
/// answer also moves on, since a later authority may hold the code that was
/// actually issued; the last negative answer is returned when nobody says
/// yes. When every authority falls through on errors, the last error is
/// returned.
pub struct AuthorityChain {
    authorities: Vec<Arc<dyn VerificationAuthority>>,
}

impl AuthorityChain {
    pub fn new(authorities: Vec<Arc<dyn VerificationAuthority>>) -> Self {
        Self { authorities }
    }

    pub fn contains(&self, kind: AuthorityKind) -> bool {
        self.authorities.iter().any(|a| a.kind() == kind)
    }

    pub async fn send_code(
        &self,
        email: &str,
        display_name: Option<&str>,
        purpose: SendPurpose,
    ) -> Result<Answered<DeliveryToken>, VerificationError> {
        let mut last_error = None;
        for authority in &self.authorities {
            let result = authority.send_code(email, display_name, purpose).await;
            match settle(authority.as_ref(), "send_code", result) {
                ControlFlow::Break(answer) => return answer,
                ControlFlow::Continue(err) => last_error = Some(err),
            }
        }
        Err(exhausted(last_error))
    }

    pub async fn verify_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Answered<bool>, VerificationError> {
        let mut declined = None;
        let mut last_error = None;
        for authority in &self.authorities {
            let result = authority.verify_code(email, code).await;
            match settle(authority.as_ref(), "verify_code", result) {
                ControlFlow::Break(Ok(answer)) if !answer.value => declined = Some(answer),
                ControlFlow::Break(answer) => return answer,
                ControlFlow::Continue(err) => last_error = Some(err),
            }
        }
        declined.ok_or_else(|| exhausted(last_error))
    }

    pub async fn check_status(&self, email: &str) -> Result<Answered<bool>, VerificationError> {
        let mut declined = None;
        let mut last_error = None;
        for authority in &self.authorities {
            let result = authority.check_status(email).await;
            match settle(authority.as_ref(), "check_status", result) {
                ControlFlow::Break(Ok(answer)) if !answer.value => declined = Some(answer),
                ControlFlow::Break(answer) => return answer,
                ControlFlow::Continue(err) => last_error = Some(err),
            }
        }
        declined.ok_or_else(|| exhausted(last_error))
    }
}

fn settle<T>(
    authority: &dyn VerificationAuthority,
    operation: &'static str,
    result: Result<T, VerificationError>,
) -> ControlFlow<Result<Answered<T>, VerificationError>, VerificationError> {
    match result {
        Ok(value) => ControlFlow::Break(Ok(Answered {
            value,
            authority: authority.kind(),
        })),
        Err(err) if err.triggers_fallback() => {
            tracing::warn!(
                authority = authority.name(),
                operation = operation,
                error = %err,
                event = "authority_fallback",
                "Verification authority unavailable, trying next"
            );
            ControlFlow::Continue(err)
        }
        Err(err) => ControlFlow::Break(Err(err)),
    }
}

fn exhausted(last_error: Option<VerificationError>) -> VerificationError {
    last_error.unwrap_or_else(|| {
        VerificationError::NetworkUnavailable("no verification authority configured".to_string())
    })
}
