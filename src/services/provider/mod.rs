//! Network access.

mod retry;
pub use retry::*;

mod solana;
pub use solana::*;
