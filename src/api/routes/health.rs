//! This module provides the health check endpoint for the API.
//!
//! The `/health` endpoint can be used to verify that the service is running and responsive.
use crate::api::controllers::health;
use actix_web::{get, web, Responder};

/// Handles the `/health` endpoint.
///
/// Returns an `HttpResponse` with a status of `200 OK` and a body of `"OK"`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = String),
    )
)]
#[get("/health")]
async fn health_check() -> impl Responder {
    health::health().await
}

/// Initializes the health check routes.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}
