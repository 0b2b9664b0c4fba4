//! Constants for Solana RPC access and transaction submission.

/// Default RPC endpoint used when `RPC_URL` is not set.
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default per-request RPC timeout.
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 30;

/// Retries applied to transient RPC failures (not counting the first attempt).
pub const DEFAULT_RPC_MAX_RETRIES: u8 = 3;
pub const DEFAULT_RPC_RETRY_BASE_DELAY_MS: u64 = 250;
pub const DEFAULT_RPC_RETRY_MAX_DELAY_MS: u64 = 2000;

/// Maximum number of times a mint transaction is sent. Every resend is
/// preceded by a signature status check.
pub const DEFAULT_SUBMIT_MAX_ATTEMPTS: u8 = 3;

pub const DEFAULT_CONFIRMATION_MAX_POLLS: u32 = 30;
pub const DEFAULT_CONFIRMATION_POLL_INTERVAL_MS: u64 = 1000;

/// Public keys are 32 bytes, which base58-encode to 43 or 44 characters
/// for every key a browser wallet hands out.
pub const ACCOUNT_IDENTITY_MIN_LEN: usize = 43;
pub const ACCOUNT_IDENTITY_MAX_LEN: usize = 44;
pub const ACCOUNT_IDENTITY_BYTES: usize = 32;

/// Upper bound the runtime accepts for a compute-unit limit request.
pub const MAX_COMPUTE_UNIT_LIMIT: u32 = 1_400_000;
