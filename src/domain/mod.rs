//! # Domain Module
//!
//! Core domain logic of the co-signing service:
//!
//! * Candy machine creation and minting
//! * The transaction pipeline (build, rebind, co-sign, submit)

mod candy_machine;
pub use candy_machine::*;

mod transaction;
pub use transaction::*;
