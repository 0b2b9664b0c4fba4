//! Server settings read from the environment.
use std::{env, str::FromStr, time::Duration};

use solana_sdk::commitment_config::CommitmentConfig;

use crate::{
    constants::{
        DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIRMATION_MAX_POLLS,
        DEFAULT_CONFIRMATION_POLL_INTERVAL_MS, DEFAULT_HOST, DEFAULT_PORT,
        DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_RPC_MAX_RETRIES,
        DEFAULT_RPC_RETRY_BASE_DELAY_MS, DEFAULT_RPC_RETRY_MAX_DELAY_MS,
        DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SOLANA_RPC_URL, DEFAULT_SUBMIT_MAX_ATTEMPTS,
    },
    domain::SubmitConfig,
    services::RetryConfig,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rpc_url: String,
    pub rpc_commitment: CommitmentConfig,
    pub rpc_timeout_seconds: u64,
    pub rpc_max_retries: u8,
    pub rpc_retry_base_delay_ms: u64,
    pub rpc_retry_max_delay_ms: u64,
    /// Solana CLI keypair file. A throwaway key is generated when unset.
    pub server_keypair_path: Option<String>,
    pub config_dir: String,
    pub config_file_name: String,
    pub mint_records_dir: Option<String>,
    pub confirmation_max_polls: u32,
    pub confirmation_poll_interval_ms: u64,
    pub submit_max_attempts: u8,
    pub request_timeout_seconds: u64,
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", DEFAULT_PORT),
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string()),
            rpc_commitment: parse_or("RPC_COMMITMENT", CommitmentConfig::confirmed()),
            rpc_timeout_seconds: parse_or("RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS),
            rpc_max_retries: parse_or("RPC_MAX_RETRIES", DEFAULT_RPC_MAX_RETRIES),
            rpc_retry_base_delay_ms: parse_or(
                "RPC_RETRY_BASE_DELAY_MS",
                DEFAULT_RPC_RETRY_BASE_DELAY_MS,
            ),
            rpc_retry_max_delay_ms: parse_or(
                "RPC_RETRY_MAX_DELAY_MS",
                DEFAULT_RPC_RETRY_MAX_DELAY_MS,
            ),
            server_keypair_path: non_empty("SERVER_KEYPAIR_PATH"),
            config_dir: env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string()),
            config_file_name: env::var("CONFIG_FILE_NAME")
                .unwrap_or_else(|_| DEFAULT_CONFIG_FILE_NAME.to_string()),
            mint_records_dir: non_empty("MINT_RECORDS_DIR"),
            confirmation_max_polls: parse_or(
                "CONFIRMATION_MAX_POLLS",
                DEFAULT_CONFIRMATION_MAX_POLLS,
            ),
            confirmation_poll_interval_ms: parse_or(
                "CONFIRMATION_POLL_INTERVAL_MS",
                DEFAULT_CONFIRMATION_POLL_INTERVAL_MS,
            ),
            submit_max_attempts: parse_or("SUBMIT_MAX_ATTEMPTS", DEFAULT_SUBMIT_MAX_ATTEMPTS),
            request_timeout_seconds: parse_or(
                "REQUEST_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            ),
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.rpc_max_retries,
            self.rpc_retry_base_delay_ms,
            self.rpc_retry_max_delay_ms,
        )
    }

    pub fn submit_config(&self) -> SubmitConfig {
        SubmitConfig {
            max_attempts: self.submit_max_attempts.max(1),
            max_polls: self.confirmation_max_polls.max(1),
            poll_interval: Duration::from_millis(self.confirmation_poll_interval_ms),
        }
    }
}
