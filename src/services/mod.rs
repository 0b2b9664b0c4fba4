//! # Services Module
//!
//! Integrations with the Solana network, key custody and instruction
//! assembly for the candy machine programs.

pub mod candy_machine;

mod provider;
pub use provider::*;

pub mod signer;
pub use signer::*;
