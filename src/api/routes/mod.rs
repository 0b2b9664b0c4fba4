//! # API Routes Module
//!
//! Configures HTTP routes for the co-signing service.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/create-candy-machine` - Partially signed creation transaction
//! * `/mint-candy-machine` - Server-submitted mint
//! * `/api-docs/openapi.json` - OpenAPI document

pub mod candy_machine;
pub mod docs;
pub mod health;

use actix_web::web;
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(candy_machine::init)
        .configure(docs::init);
}
