use actix_web::{web, HttpResponse};
use raseed_shared::utils::normalize_email;
use validator::Validate;

use super::AppState;
use crate::dto::auth::{StatusQuery, StatusResponse};
use crate::handlers::validation_error_response;

/// Handler for GET /api/v1/auth/status?email=
///
/// `verified` asks the remote authority first; `state` is derived from the
/// local record.
pub async fn status(state: web::Data<AppState>, query: web::Query<StatusQuery>) -> HttpResponse {
    if let Err(errors) = query.validate() {
        return validation_error_response(&errors);
    }

    let email = normalize_email(&query.email);
    let verified = state.manager.is_verified(&email).await;
    let local_state = state.manager.state(&email).await;

    HttpResponse::Ok().json(StatusResponse {
        email,
        verified,
        state: local_state,
    })
}
