use actix_web::{web, HttpResponse};
use raseed_shared::utils::mask_email;
use validator::Validate;

use super::send_code::sent_response;
use super::AppState;
use crate::dto::auth::SendCodeRequest;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/resend-code
///
/// Same contract as send-code. Issues a fresh code, invalidating the
/// previous one and restarting the validity window.
pub async fn resend_code(
    state: web::Data<AppState>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    tracing::info!(email = %mask_email(&request.email), "Processing resend_code request");

    match state
        .manager
        .resend_code(&request.email, request.display_name.as_deref())
        .await
    {
        Ok(token) => HttpResponse::Ok().json(sent_response(&state.manager, token)),
        Err(e) => handle_domain_error(e),
    }
}
