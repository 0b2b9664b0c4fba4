//! Application state initialization
//!
//! Loads the server key, the candy machine settings and the RPC provider,
//! and wires them into the candy machine service.
use crate::{
    config::{CandyMachineFileConfig, ServerConfig},
    domain::{CandyMachineService, DefaultCandyMachineService},
    models::{AppState, DefaultAppState},
    repositories::InMemoryMachineRepository,
    services::{
        candy_machine::CandyMachineInstructionFactory,
        signer::{InMemorySecretProvider, KeypairFileSecretProvider, ServerSecretProvider},
        LocalSigner, SolanaProvider,
    },
};
use actix_web::web;
use color_eyre::Result;
use eyre::WrapErr;
use log::{info, warn};
use solana_sdk::signature::Keypair;
use std::{path::PathBuf, sync::Arc};
use zeroize::Zeroizing;

/// Selects the key source: the configured keypair file, or a throwaway key.
fn server_secret_provider(server_config: &ServerConfig) -> ServerSecretProvider {
    match &server_config.server_keypair_path {
        Some(path) => {
            info!("Using server keypair file {path}");
            ServerSecretProvider::File(KeypairFileSecretProvider::new(path))
        }
        None => {
            warn!(
                "SERVER_KEYPAIR_PATH is not set; generated an ephemeral server key. \
                 Candy machines created now cannot be administered after a restart."
            );
            let keypair = Keypair::new();
            ServerSecretProvider::InMemory(InMemorySecretProvider::new(Zeroizing::new(
                keypair.to_bytes().to_vec(),
            )))
        }
    }
}

/// Initializes application state
///
/// # Errors
///
/// Returns error if:
/// - The server key cannot be loaded or is malformed
/// - The candy machine config file is unreadable or invalid
/// - The RPC URL is not an http(s) URL
pub fn initialize_app_state(
    server_config: &ServerConfig,
) -> Result<web::ThinData<DefaultAppState>> {
    let signer = LocalSigner::new(server_secret_provider(server_config))
        .wrap_err("Failed to load the server key")?;
    let server_pubkey = signer.address();
    info!("Server key: {server_pubkey}");

    let params = CandyMachineFileConfig::load(
        &server_config.config_dir,
        &server_config.config_file_name,
    )
    .and_then(|config| config.into_creation_params(server_pubkey))
    .wrap_err("Failed to load the candy machine config")?;

    let provider = SolanaProvider::new(
        &server_config.rpc_url,
        server_config.rpc_timeout_seconds,
        server_config.rpc_commitment,
        server_config.retry_config(),
    )
    .wrap_err("Failed to create the Solana RPC provider")?;
    info!(
        "Using RPC endpoint {} with {:?} commitment",
        server_config.rpc_url, server_config.rpc_commitment.commitment
    );

    let service: DefaultCandyMachineService = CandyMachineService::new(
        Arc::new(provider),
        Arc::new(CandyMachineInstructionFactory::new()),
        Arc::new(signer),
        Arc::new(InMemoryMachineRepository::new()),
        params,
        server_config.rpc_commitment,
        server_config.submit_config(),
        server_config.mint_records_dir.as_ref().map(PathBuf::from),
    );

    Ok(web::ThinData(AppState::new(Arc::new(service))))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::constants::DEFAULT_CONFIG_FILE_NAME;
    use solana_sdk::commitment_config::CommitmentConfig;

    /// Server settings pointing at an unreachable endpoint with no retries.
    pub fn offline_server_config(config_dir: &std::path::Path) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rpc_url: "http://127.0.0.1:1".to_string(),
            rpc_commitment: CommitmentConfig::confirmed(),
            rpc_timeout_seconds: 1,
            rpc_max_retries: 0,
            rpc_retry_base_delay_ms: 1,
            rpc_retry_max_delay_ms: 1,
            server_keypair_path: None,
            config_dir: config_dir.to_string_lossy().into_owned(),
            config_file_name: DEFAULT_CONFIG_FILE_NAME.to_string(),
            mint_records_dir: None,
            confirmation_max_polls: 1,
            confirmation_poll_interval_ms: 1,
            submit_max_attempts: 1,
            request_timeout_seconds: 5,
        }
    }
}
