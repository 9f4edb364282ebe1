//! CORS configuration for the browser front end.
//!
//! Development allows any origin so the UI dev server can call the API.
//! Production only allows the origins listed in `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use raseed_shared::config::{Environment, ServerConfig};

const MAX_AGE_SECS: usize = 3600;

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment == Environment::Production || !server.allowed_origins.is_empty() {
        create_restricted_cors(&server.allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    tracing::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::CACHE_CONTROL,
        ])
        .max_age(MAX_AGE_SECS)
}

fn create_restricted_cors(origins: &[String]) -> Cors {
    tracing::info!(origins = origins.len(), "Configuring restricted CORS");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(MAX_AGE_SECS);

    for origin in origins {
        tracing::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }
    cors
}
