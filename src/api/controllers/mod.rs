//! # API Controllers Module
//!
//! Handles HTTP request processing and business logic coordination.
//!
//! ## Controllers
//!
//! * `candy_machine` - Candy machine creation and minting
//! * `health` - Liveness endpoint

pub mod candy_machine;
pub mod health;
