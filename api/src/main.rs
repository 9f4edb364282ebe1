use actix_web::{web, HttpServer};
use anyhow::Context;

use raseed_api::middleware::create_cors;
use raseed_api::{create_app, telemetry, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = raseed_infra::load_config();
    telemetry::init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        "Starting Raseed verification API"
    );

    let manager = raseed_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;
    let state = web::Data::new(AppState::new(manager));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), create_cors(environment, &server_config))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")?;

    Ok(())
}
