//! Candy machine co-signing server.
//!
//! Reads its settings from the environment (and `.env`), loads the server key
//! and candy machine settings, then serves the HTTP API.
use actix_web::middleware::Logger;
use actix_web::{middleware, App, HttpServer};
use candy_cosigner::{
    api::{middleware::RequestDeadline, routes::configure_routes},
    bootstrap::initialize_app_state,
    config::ServerConfig,
    constants::{DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS, SERVER_SHUTDOWN_TIMEOUT_SECONDS},
    logging::setup_logging,
};
use color_eyre::Result;
use dotenvy::dotenv;
use log::info;
use std::time::Duration;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load environment variables from .env file
    dotenv().ok();
    setup_logging()?;

    let config = ServerConfig::from_env();
    let app_state = initialize_app_state(&config)?;
    let request_timeout_seconds = config.request_timeout_seconds;

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestDeadline::new(request_timeout_seconds))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_routes)
    })
    .client_disconnect_timeout(Duration::from_secs(
        DEFAULT_CLIENT_DISCONNECT_TIMEOUT_SECONDS,
    ))
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(SERVER_SHUTDOWN_TIMEOUT_SECONDS);

    info!("Server running at http://{}:{}", config.host, config.port);

    server.run().await?;
    Ok(())
}
