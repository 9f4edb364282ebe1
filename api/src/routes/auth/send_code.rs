use actix_web::{web, HttpResponse};
use raseed_core::domain::value_objects::DeliveryToken;
use raseed_core::services::verification::VerificationManager;
use raseed_shared::utils::mask_email;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/send-code
///
/// Sends a verification code to the given email address.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@x.com",
///     "display_name": "Alice"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Verification code sent",
///     "channel": "local",
///     "expires_in": 600
/// }
/// ```
///
/// ## Errors
/// - 400 `validation_error`: malformed email
/// - 503 `delivery_failed`: the fallback email could not be sent
pub async fn send_code(
    state: web::Data<AppState>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        tracing::warn!(errors = ?errors, "Validation failed for send_code request");
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing send_code request");

    match state
        .manager
        .send_code(&request.email, request.display_name.as_deref())
        .await
    {
        Ok(token) => HttpResponse::Ok().json(sent_response(&state.manager, token)),
        Err(e) => handle_domain_error(e),
    }
}

pub(crate) fn sent_response(manager: &VerificationManager, token: DeliveryToken) -> SendCodeResponse {
    SendCodeResponse {
        message: "Verification code sent".to_string(),
        channel: token.authority,
        expires_in: manager.code_expiry().num_seconds(),
    }
}
