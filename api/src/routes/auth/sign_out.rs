use actix_web::{web, HttpResponse};

use super::AppState;
use crate::dto::auth::SignOutResponse;

/// Handler for POST /api/v1/auth/sign-out
///
/// Clears the verification record. Always succeeds.
pub async fn sign_out(state: web::Data<AppState>) -> HttpResponse {
    state.manager.clear().await;
    tracing::info!("Signed out, verification record cleared");

    HttpResponse::Ok().json(SignOutResponse {
        message: "Signed out".to_string(),
    })
}
