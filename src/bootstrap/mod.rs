//! Initialization routines for the co-signing service.
mod initialize_app_state;
pub use initialize_app_state::*;
