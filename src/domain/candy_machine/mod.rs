//! Candy machine creation and minting on behalf of a wallet.
//!
//! Creation builds the machine with the server key as authority, rebinds the
//! fee payer to the wallet and co-signs; the wallet adds the last signature
//! and submits. Minting is signed and submitted by the server.

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};
#[cfg(test)]
use mockall::automock;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::{
    constants::{CREATE_SUCCESS_MESSAGE, DEFAULT_COMPUTE_UNIT_LIMIT, MINT_SUCCESS_MESSAGE},
    domain::{
        cosign_transaction, ensure_only_missing, rebind_fee_payer, send_and_confirm,
        validate_partial_signatures, SubmitConfig, TransactionBuilder,
    },
    models::{
        ensure_wire_size, AccountIdentity, CreateCandyMachineResponse, CreationAccounts,
        CreationParams, EncodedSerializedTransaction, MachineRecord, MintAccounts,
        MintCandyMachineResponse, MintedNft, RepositoryError, TransactionError,
    },
    repositories::{InMemoryMachineRepository, MachineRepository},
    services::{
        candy_machine::{CandyMachineInstructionFactory, InstructionFactory},
        EphemeralSigner, LocalSigner, ServerSecretProvider, SolanaProvider, SolanaProviderTrait,
        SolanaSignTrait,
    },
};

pub const NO_CANDY_MACHINE_MESSAGE: &str =
    "No Candy Machine is set. Please call create-candy-machine first.";

#[async_trait]
#[cfg_attr(test, automock)]
pub trait CandyMachineServiceTrait: Send + Sync {
    /// Builds and co-signs a creation transaction paid for by the wallet.
    async fn create_candy_machine(
        &self,
        user_pubkey: Option<String>,
    ) -> Result<CreateCandyMachineResponse, TransactionError>;

    /// Mints one asset to the wallet from its most recent candy machine.
    async fn mint_candy_machine(
        &self,
        user_pubkey: Option<String>,
    ) -> Result<MintCandyMachineResponse, TransactionError>;
}

pub struct CandyMachineService<P, F, S, R>
where
    P: SolanaProviderTrait,
    F: InstructionFactory,
    S: SolanaSignTrait,
    R: MachineRepository,
{
    provider: Arc<P>,
    builder: TransactionBuilder<P, F>,
    signer: Arc<S>,
    repository: Arc<R>,
    params: CreationParams,
    submit_config: SubmitConfig,
    mint_records_dir: Option<PathBuf>,
    sequence: AtomicU64,
}

pub type DefaultCandyMachineService = CandyMachineService<
    SolanaProvider,
    CandyMachineInstructionFactory,
    LocalSigner<ServerSecretProvider>,
    InMemoryMachineRepository,
>;

impl<P, F, S, R> CandyMachineService<P, F, S, R>
where
    P: SolanaProviderTrait,
    F: InstructionFactory,
    S: SolanaSignTrait,
    R: MachineRepository,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<P>,
        factory: Arc<F>,
        signer: Arc<S>,
        repository: Arc<R>,
        params: CreationParams,
        commitment: CommitmentConfig,
        submit_config: SubmitConfig,
        mint_records_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            builder: TransactionBuilder::new(Arc::clone(&provider), factory, commitment),
            provider,
            signer,
            repository,
            params,
            submit_config,
            mint_records_dir,
            sequence: AtomicU64::new(0),
        }
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn create(
        &self,
        user: AccountIdentity,
    ) -> Result<CreateCandyMachineResponse, TransactionError> {
        let sequence = self.next_sequence();
        let authority = self.signer.pubkey().await?;
        let candy_machine = EphemeralSigner::new();
        let collection = EphemeralSigner::new();
        let accounts = CreationAccounts {
            candy_machine: candy_machine.address(),
            collection: collection.address(),
            authority,
        };
        info!(
            "Creating candy machine {} (collection {}) for {} [request {}]",
            accounts.candy_machine, accounts.collection, user, sequence
        );

        let template = self.builder.build_creation(&self.params, &accounts).await?;
        let rebound = rebind_fee_payer(&template.compile(), &user)?;
        ensure_wire_size(&rebound)?;
        let signers: [&dyn SolanaSignTrait; 3] =
            [self.signer.as_ref(), &candy_machine, &collection];
        let signed = cosign_transaction(rebound, &signers).await?;
        ensure_only_missing(&signed, user.pubkey())?;

        let transaction = EncodedSerializedTransaction::encode(&signed, false)?;

        let record = MachineRecord {
            id: uuid::Uuid::new_v4().to_string(),
            sequence,
            owner: *user.pubkey(),
            candy_machine: accounts.candy_machine,
            collection: accounts.collection,
            authority,
            items_available: self.params.items_available,
            created_at: Utc::now(),
        };
        if !self.repository.upsert_if_newer(record).await? {
            info!(
                "A newer candy machine already exists for {user}; request {sequence} not recorded"
            );
        }

        Ok(CreateCandyMachineResponse {
            message: CREATE_SUCCESS_MESSAGE.to_string(),
            transaction: transaction.into_inner(),
            candy_machine: accounts.candy_machine.to_string(),
            collection: accounts.collection.to_string(),
            last_valid_block_height: template.last_valid_block_height(),
        })
    }

    async fn mint(&self, user: AccountIdentity) -> Result<MintCandyMachineResponse, TransactionError> {
        let record = match self.repository.get_latest(user.pubkey()).await {
            Ok(record) => record,
            Err(RepositoryError::NotFound(_)) => {
                return Err(TransactionError::StateInconsistency(
                    NO_CANDY_MACHINE_MESSAGE.to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        let account = self
            .provider
            .get_account(&record.candy_machine)
            .await
            .map_err(|e| {
                TransactionError::NetworkUnavailable(format!(
                    "failed to fetch candy machine {}: {e}",
                    record.candy_machine
                ))
            })?;
        if account.is_none() {
            return Err(TransactionError::StateInconsistency(format!(
                "Candy machine {} not found on chain; the creation transaction has not been submitted",
                record.candy_machine
            )));
        }

        let minter = self.signer.pubkey().await?;
        let asset = EphemeralSigner::new();
        let accounts = MintAccounts {
            candy_machine: record.candy_machine,
            collection: record.collection,
            asset: asset.address(),
            minter,
            owner: *user.pubkey(),
        };
        info!(
            "Minting asset {} from candy machine {} for {}",
            accounts.asset, accounts.candy_machine, user
        );

        let compute_unit_limit = if self.params.compute_unit_limit > 0 {
            self.params.compute_unit_limit
        } else {
            DEFAULT_COMPUTE_UNIT_LIMIT
        };
        let template = self
            .builder
            .build_mint(&accounts, &self.params.guards, compute_unit_limit)
            .await?;
        let signers: [&dyn SolanaSignTrait; 2] = [self.signer.as_ref(), &asset];
        let signed = cosign_transaction(template.compile(), &signers).await?;
        validate_partial_signatures(&signed)?;

        let signature =
            send_and_confirm(self.provider.as_ref(), &signed, &self.submit_config).await?;

        let minted_nft = MintedNft {
            minted_nft_pubkey: accounts.asset.to_string(),
            candy_machine_pubkey: record.candy_machine.to_string(),
            collection_pubkey: record.collection.to_string(),
            minted_by: user.to_string(),
            transaction_signature: signature.to_string(),
            minted_at: Utc::now().to_rfc3339(),
        };
        self.write_mint_record(&minted_nft).await;

        Ok(MintCandyMachineResponse {
            message: MINT_SUCCESS_MESSAGE.to_string(),
            minted_nft,
            transaction_signature: signature.to_string(),
        })
    }

    /// Best effort: the asset is already minted when this runs.
    async fn write_mint_record(&self, minted: &MintedNft) {
        let Some(dir) = &self.mint_records_dir else {
            return;
        };

        let path = dir.join(format!("mint_{}.json", minted.minted_nft_pubkey));
        match persist_mint_record(dir, &path, minted).await {
            Ok(()) => info!("Wrote mint record {}", path.display()),
            Err(e) => warn!("Failed to write mint record {}: {e}", path.display()),
        }
    }
}

async fn persist_mint_record(
    dir: &Path,
    path: &Path,
    minted: &MintedNft,
) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(minted)?;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, json).await
}

#[async_trait]
impl<P, F, S, R> CandyMachineServiceTrait for CandyMachineService<P, F, S, R>
where
    P: SolanaProviderTrait,
    F: InstructionFactory,
    S: SolanaSignTrait,
    R: MachineRepository,
{
    async fn create_candy_machine(
        &self,
        user_pubkey: Option<String>,
    ) -> Result<CreateCandyMachineResponse, TransactionError> {
        info!("Incoming create request for userPubkey {:?}", user_pubkey);
        let user = AccountIdentity::from_request(user_pubkey.as_deref())?;
        self.create(user).await.inspect_err(|e| {
            warn!("Candy machine creation for {user} failed: {e}");
        })
    }

    async fn mint_candy_machine(
        &self,
        user_pubkey: Option<String>,
    ) -> Result<MintCandyMachineResponse, TransactionError> {
        info!("Incoming mint request for userPubkey {:?}", user_pubkey);
        let user = AccountIdentity::from_request(user_pubkey.as_deref())?;
        self.mint(user).await.inspect_err(|e| {
            warn!("Mint for {user} failed: {e}");
        })
    }
}
