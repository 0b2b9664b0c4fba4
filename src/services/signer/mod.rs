//! Key custody and signing.
//!
//! ```text
//! SolanaSignTrait
//!   ├── LocalSigner<P: SecretProvider>  (server key, secret re-read per signature)
//!   └── EphemeralSigner                 (fresh per-request account keys)
//! ```

mod secret_provider;
pub use secret_provider::*;

mod solana;
pub use solana::*;
