use actix_web::{web, HttpResponse};
use raseed_shared::utils::mask_email;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/verify-code
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@x.com",
///     "code": "482913"
/// }
/// ```
///
/// ## Success (200 OK)
/// ```json
/// { "verified": true }
/// ```
///
/// ## Errors
/// - 400 `invalid_code`: wrong, foreign or expired code
/// - 400 `validation_error`: malformed email or code length
pub async fn verify_code(
    state: web::Data<AppState>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing verify_code request");

    match state.manager.confirm_code(&request.code, &request.email).await {
        Ok(()) => HttpResponse::Ok().json(VerifyCodeResponse { verified: true }),
        Err(e) => handle_domain_error(e),
    }
}
