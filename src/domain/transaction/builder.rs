//! Assembles unsigned transaction templates from factory instructions.
//!
//! Every build fetches a fresh blockhash. A failed fetch fails the build;
//! there is no cached fallback.

use std::sync::Arc;

use log::{debug, info};
use solana_sdk::{commitment_config::CommitmentConfig, hash::Hash};

use crate::{
    models::{
        CreationAccounts, CreationParams, GuardSet, InstructionStage, MintAccounts,
        StagedInstruction, TransactionError, TransactionTemplate,
    },
    services::{candy_machine::InstructionFactory, SolanaProviderTrait},
};

pub struct TransactionBuilder<P, F>
where
    P: SolanaProviderTrait,
    F: InstructionFactory,
{
    provider: Arc<P>,
    factory: Arc<F>,
    commitment: CommitmentConfig,
}

impl<P, F> TransactionBuilder<P, F>
where
    P: SolanaProviderTrait,
    F: InstructionFactory,
{
    pub fn new(provider: Arc<P>, factory: Arc<F>, commitment: CommitmentConfig) -> Self {
        Self {
            provider,
            factory,
            commitment,
        }
    }

    async fn fresh_blockhash(&self) -> Result<(Hash, u64), TransactionError> {
        let (blockhash, last_valid_block_height) = self
            .provider
            .get_latest_blockhash_with_commitment(self.commitment)
            .await
            .map_err(|e| {
                TransactionError::NetworkUnavailable(format!("failed to fetch blockhash: {e}"))
            })?;

        info!(
            "Fetched blockhash {} (valid until block height {})",
            blockhash, last_valid_block_height
        );
        Ok((blockhash, last_valid_block_height))
    }

    /// Builds `[create, add-config-lines, set-compute-limit]` with the
    /// authority as fee payer.
    pub async fn build_creation(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
    ) -> Result<TransactionTemplate, TransactionError> {
        params.validate()?;

        let account_size = self.factory.machine_account_size(params);
        let rent = self
            .provider
            .get_minimum_balance_for_rent_exemption(account_size)
            .await
            .map_err(|e| {
                TransactionError::NetworkUnavailable(format!(
                    "failed to fetch rent for {account_size} bytes: {e}"
                ))
            })?;
        debug!("Candy machine account: {account_size} bytes, {rent} lamports rent");

        let mut instructions: Vec<StagedInstruction> = self
            .factory
            .create_machine(params, accounts, rent)?
            .into_iter()
            .map(|ix| StagedInstruction::new(InstructionStage::Create, ix))
            .collect();

        instructions.push(StagedInstruction::new(
            InstructionStage::AddConfigLines,
            self.factory.add_config_lines(
                &accounts.candy_machine,
                &accounts.authority,
                0,
                &params.config_lines,
            )?,
        ));

        instructions.push(StagedInstruction::new(
            InstructionStage::SetComputeLimit,
            self.factory
                .set_compute_unit_limit(params.compute_unit_limit),
        ));

        let (blockhash, last_valid_block_height) = self.fresh_blockhash().await?;

        TransactionTemplate::new(
            instructions,
            accounts.authority,
            blockhash,
            last_valid_block_height,
        )
    }

    /// Builds `[set-compute-limit, mint]` with the minter as fee payer.
    pub async fn build_mint(
        &self,
        accounts: &MintAccounts,
        guards: &GuardSet,
        compute_unit_limit: u32,
    ) -> Result<TransactionTemplate, TransactionError> {
        let instructions = vec![
            StagedInstruction::new(
                InstructionStage::SetComputeLimit,
                self.factory.set_compute_unit_limit(compute_unit_limit),
            ),
            StagedInstruction::new(InstructionStage::Mint, self.factory.mint(accounts, guards)?),
        ];

        let (blockhash, last_valid_block_height) = self.fresh_blockhash().await?;

        TransactionTemplate::new(
            instructions,
            accounts.minter,
            blockhash,
            last_valid_block_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{test_fixtures::creation_params, ErrorKind},
        services::{
            candy_machine::{CandyMachineInstructionFactory, MockInstructionFactory},
            MockSolanaProviderTrait, SolanaProviderError,
        },
    };
    use solana_sdk::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
    };

    fn accounts() -> CreationAccounts {
        CreationAccounts {
            candy_machine: Pubkey::new_unique(),
            collection: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
        }
    }

    fn provider_with(blockhash: Hash) -> MockSolanaProviderTrait {
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_minimum_balance_for_rent_exemption()
            .returning(|_| Box::pin(async { Ok(1_000_000) }));
        provider
            .expect_get_latest_blockhash_with_commitment()
            .returning(move |_| Box::pin(async move { Ok((blockhash, 500)) }));
        provider
    }

    fn marker(tag: u8) -> Instruction {
        Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[tag],
            vec![AccountMeta::new(Pubkey::new_unique(), false)],
        )
    }

    #[tokio::test]
    async fn test_creation_order_is_fixed() {
        let mut factory = MockInstructionFactory::new();
        factory.expect_machine_account_size().returning(|_| 100);
        factory
            .expect_create_machine()
            .returning(|_, _, _| Ok(vec![marker(1), marker(2)]));
        factory
            .expect_add_config_lines()
            .returning(|_, _, _, _| Ok(marker(3)));
        factory
            .expect_set_compute_unit_limit()
            .returning(|_| marker(4));

        let blockhash = Hash::new_unique();
        let builder = TransactionBuilder::new(
            Arc::new(provider_with(blockhash)),
            Arc::new(factory),
            CommitmentConfig::confirmed(),
        );
        let accounts = accounts();

        let template = builder
            .build_creation(&creation_params(accounts.authority), &accounts)
            .await
            .unwrap();

        assert_eq!(
            template.stages(),
            vec![
                InstructionStage::Create,
                InstructionStage::Create,
                InstructionStage::AddConfigLines,
                InstructionStage::SetComputeLimit,
            ]
        );
        let tags: Vec<u8> = template
            .instructions()
            .iter()
            .map(|ix| ix.instruction.data[0])
            .collect();
        assert_eq!(tags, vec![1, 2, 3, 4]);
        assert_eq!(template.fee_payer(), &accounts.authority);
        assert_eq!(template.recent_blockhash(), &blockhash);
        assert_eq!(template.last_valid_block_height(), 500);
    }

    #[tokio::test]
    async fn test_blockhash_failure_is_network_unavailable() {
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_minimum_balance_for_rent_exemption()
            .returning(|_| Box::pin(async { Ok(1) }));
        provider
            .expect_get_latest_blockhash_with_commitment()
            .returning(|_| {
                Box::pin(async {
                    Err(SolanaProviderError::NetworkError("connection refused".to_string()))
                })
            });

        let builder = TransactionBuilder::new(
            Arc::new(provider),
            Arc::new(CandyMachineInstructionFactory::new()),
            CommitmentConfig::confirmed(),
        );
        let accounts = accounts();
        let err = builder
            .build_creation(&creation_params(accounts.authority), &accounts)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NetworkUnavailable);
        assert!(err.details().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_invalid_params_fail_before_network() {
        let mut provider = MockSolanaProviderTrait::new();
        provider
            .expect_get_minimum_balance_for_rent_exemption()
            .never();
        provider
            .expect_get_latest_blockhash_with_commitment()
            .never();

        let builder = TransactionBuilder::new(
            Arc::new(provider),
            Arc::new(CandyMachineInstructionFactory::new()),
            CommitmentConfig::confirmed(),
        );
        let accounts = accounts();
        let mut params = creation_params(accounts.authority);
        params.items_available = 3;

        let err = builder.build_creation(&params, &accounts).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[tokio::test]
    async fn test_real_factory_compiles_deterministically() {
        let blockhash = Hash::new_unique();
        let builder = TransactionBuilder::new(
            Arc::new(provider_with(blockhash)),
            Arc::new(CandyMachineInstructionFactory::new()),
            CommitmentConfig::confirmed(),
        );
        let accounts = accounts();
        let params = creation_params(accounts.authority);

        let first = builder.build_creation(&params, &accounts).await.unwrap();
        let second = builder.build_creation(&params, &accounts).await.unwrap();
        assert_eq!(
            first.compile().message_data(),
            second.compile().message_data()
        );
        assert_eq!(first.compile().message.account_keys[0], accounts.authority);
    }

    #[tokio::test]
    async fn test_mint_template() {
        let builder = TransactionBuilder::new(
            Arc::new(provider_with(Hash::new_unique())),
            Arc::new(CandyMachineInstructionFactory::new()),
            CommitmentConfig::confirmed(),
        );
        let accounts = MintAccounts {
            candy_machine: Pubkey::new_unique(),
            collection: Pubkey::new_unique(),
            asset: Pubkey::new_unique(),
            minter: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
        };

        let template = builder
            .build_mint(&accounts, &GuardSet::default(), 800_000)
            .await
            .unwrap();
        assert_eq!(
            template.stages(),
            vec![InstructionStage::SetComputeLimit, InstructionStage::Mint]
        );
        assert_eq!(template.fee_payer(), &accounts.minter);
    }
}
