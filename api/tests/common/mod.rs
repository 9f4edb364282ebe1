//! Shared setup for the API integration tests

#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::test::TestRequest;
use actix_web::{web, App, HttpResponse, HttpServer};
use raseed_api::middleware::create_cors;
use raseed_api::AppState;
use raseed_core::services::verification::{
    LocalVerificationAuthority, VerificationManager, VerificationServiceConfig,
};
use raseed_infra::email::ConsoleEmailService;
use raseed_infra::remote::RemoteVerificationAuthority;
use raseed_infra::storage::MemoryStore;
use raseed_shared::config::{Environment, RemoteAuthorityConfig, ServerConfig};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub mailer: ConsoleEmailService,
    pub store: Arc<MemoryStore>,
}

fn local_authority(mailer: &ConsoleEmailService, store: &Arc<MemoryStore>) -> Arc<LocalVerificationAuthority> {
    Arc::new(LocalVerificationAuthority::new(
        store.clone(),
        Arc::new(mailer.clone()),
        VerificationServiceConfig::default(),
    ))
}

/// Local-only manager with a silent console mailer
pub fn local_context() -> TestContext {
    let mailer = ConsoleEmailService::with_options(false, false);
    let store = Arc::new(MemoryStore::new());
    let manager = VerificationManager::new(local_authority(&mailer, &store));

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(manager))),
        mailer,
        store,
    }
}

/// Manager that tries the backend at `base_url` first
pub fn remote_context(base_url: &str) -> TestContext {
    let mailer = ConsoleEmailService::with_options(false, false);
    let store = Arc::new(MemoryStore::new());
    let remote = RemoteVerificationAuthority::new(RemoteAuthorityConfig::new(base_url)).unwrap();
    let manager =
        VerificationManager::with_remote(Arc::new(remote), local_authority(&mailer, &store));

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(manager))),
        mailer,
        store,
    }
}

pub fn cors() -> Cors {
    create_cors(Environment::Development, &ServerConfig::default())
}

/// Backend that accepts code 482913 for any address
pub async fn spawn_backend() -> String {
    let server = HttpServer::new(|| {
        App::new()
            .route(
                "/api/auth/send-verification",
                web::post().to(|| async {
                    HttpResponse::Ok().json(json!({ "message": "Verification email sent" }))
                }),
            )
            .route(
                "/api/auth/resend-verification",
                web::post().to(|| async {
                    HttpResponse::Ok().json(json!({ "message": "Verification email resent" }))
                }),
            )
            .route(
                "/api/auth/verify-code",
                web::post().to(|body: web::Json<serde_json::Value>| async move {
                    HttpResponse::Ok().json(json!({ "verified": body["code"] == "482913" }))
                }),
            )
            .route(
                "/api/auth/verification-status",
                web::post().to(|| async { HttpResponse::Ok().json(json!({ "verified": false })) }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

/// Backend that answers every request with a 503
pub async fn spawn_down_backend() -> String {
    let server = HttpServer::new(|| {
        App::new().default_service(web::to(|| async {
            HttpResponse::ServiceUnavailable().json(json!({ "error": "maintenance" }))
        }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

/// Backend that answers 503 until the returned flag is set, then declines every code
pub async fn spawn_switchable_backend() -> (String, Arc<AtomicBool>) {
    let online = Arc::new(AtomicBool::new(false));
    let flag = web::Data::from(online.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(flag.clone())
            .default_service(web::to(|flag: web::Data<AtomicBool>| async move {
                if flag.load(Ordering::SeqCst) {
                    HttpResponse::Ok().json(json!({ "verified": false }))
                } else {
                    HttpResponse::ServiceUnavailable().json(json!({ "error": "maintenance" }))
                }
            }))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    (format!("http://{}", addr), online)
}

pub fn send_request(email: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "email": email }))
}

pub fn verify_request(email: &str, code: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "email": email, "code": code }))
}

pub fn status_request(email: &str) -> TestRequest {
    TestRequest::get()
        .uri(&format!("/api/v1/auth/status?email={}", email))
}
