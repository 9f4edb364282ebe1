use actix_web::HttpResponse;
use raseed_core::errors::{DomainError, VerificationError};
use raseed_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Wrong, foreign and expired codes share one answer so callers cannot
/// tell them apart.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Verification(verification_error) => match verification_error {
            VerificationError::ValidationFailed => {
                tracing::info!("Verification code rejected");
                HttpResponse::BadRequest().json(ErrorResponse::new(
                    error_codes::INVALID_CODE,
                    "Invalid verification code",
                ))
            }
            VerificationError::InvalidEmail { .. } => HttpResponse::BadRequest().json(
                ErrorResponse::new(error_codes::INVALID_EMAIL, "Invalid email address"),
            ),
            VerificationError::DeliveryFailed(reason) => {
                tracing::error!(error = %reason, "Verification email delivery failed");
                HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                    error_codes::DELIVERY_FAILED,
                    "Could not send verification email",
                ))
            }
            VerificationError::Storage(reason) => {
                tracing::error!(error = %reason, "Verification storage failure");
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    error_codes::STORAGE_ERROR,
                    "Verification state could not be saved",
                ))
            }
            err @ (VerificationError::NetworkUnavailable(_)
            | VerificationError::RemoteRejected { .. }) => {
                tracing::error!(error = %err, "No verification authority available");
                HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Verification service unavailable",
                ))
            }
        },
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 400 response listing the failing fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (VerificationError::ValidationFailed, StatusCode::BAD_REQUEST),
            (
                VerificationError::DeliveryFailed("smtp".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                VerificationError::Storage("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                VerificationError::InvalidEmail { email: String::new() },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error.into()).status(), status);
        }
    }
}
