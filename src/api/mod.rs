//! # API Module
//!
//! Contains HTTP API implementation for the co-signing service.
//!
//! ## Structure
//!
//! * `controllers` - Request handling
//! * `routes` - API endpoint definitions and routing
//! * `middleware` - Per-request deadline

pub mod controllers;

pub mod middleware;

pub mod routes;
