//! Health check controller.

use actix_web::HttpResponse;

/// Handles the health check endpoint.
///
/// Returns an `HttpResponse` with a status of `200 OK` and a body of `"OK"`.
pub async fn health() -> Result<HttpResponse, actix_web::Error> {
    Ok(HttpResponse::Ok().body("OK"))
}
