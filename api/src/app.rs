//! Application factory
//!
//! Builds the Actix-web application around a shared [`AppState`].

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use chrono::Utc;
use raseed_shared::errors::{error_codes, ErrorResponse};
use raseed_shared::types::{HealthResponse, HealthStatus};
use tracing_actix_web::TracingLogger;

use crate::routes::auth::{self, AppState};

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        // Order matters: CORS runs inside the request span
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(configure_auth))
        .default_service(web::route().to(not_found))
}

/// Register the verification routes under `/auth`
pub fn configure_auth(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/send-code", web::post().to(auth::send_code))
            .route("/resend-code", web::post().to(auth::resend_code))
            .route("/verify-code", web::post().to(auth::verify_code))
            .route("/status", web::get().to(auth::status))
            .route("/time-remaining", web::get().to(auth::time_remaining))
            .route("/sign-out", web::post().to(auth::sign_out)),
    );
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: HealthStatus::Healthy,
        service: "raseed-api".to_string(),
        remote_authority: state.manager.has_remote(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
