mod candy_machine;
pub use candy_machine::*;

mod logging;
pub use logging::*;

mod server;
pub use server::*;

mod solana_transaction;
pub use solana_transaction::*;
