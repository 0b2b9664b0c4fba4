use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use solana_system_interface::{instruction as system_instruction, program as system_program};

use super::{
    layout::{
        anchor_data, encode_guard_data, tagged_data, AddConfigLinesArgs, CandyMachineData,
        CreateCollectionV1Args, MintV1Args,
    },
    InstructionFactory,
};
use crate::{
    constants::{
        CANDY_GUARD_PROGRAM_ID, CANDY_GUARD_SEED, CANDY_MACHINE_AUTHORITY_SEED,
        CANDY_MACHINE_DATA_SIZE, CANDY_MACHINE_HEADER_SIZE, CANDY_MACHINE_PROGRAM_ID,
        MPL_CORE_CREATE_COLLECTION_V1, MPL_CORE_PROGRAM_ID,
    },
    models::{
        ConfigLine, CreationAccounts, CreationParams, GuardSet, MintAccounts, TransactionError,
    },
};

/// Builds instructions for the core candy machine, candy guard and core
/// asset programs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandyMachineInstructionFactory;

impl CandyMachineInstructionFactory {
    pub fn new() -> Self {
        Self
    }

    /// PDA that acts as mint authority of the candy machine.
    pub fn authority_pda(candy_machine: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(
            &[CANDY_MACHINE_AUTHORITY_SEED, candy_machine.as_ref()],
            &CANDY_MACHINE_PROGRAM_ID,
        )
        .0
    }

    /// Guard account derived from the candy machine key used as base.
    pub fn candy_guard_pda(base: &Pubkey) -> Pubkey {
        Pubkey::find_program_address(&[CANDY_GUARD_SEED, base.as_ref()], &CANDY_GUARD_PROGRAM_ID).0
    }

    fn create_collection(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
    ) -> Result<Instruction, TransactionError> {
        let data = tagged_data(
            MPL_CORE_CREATE_COLLECTION_V1,
            &CreateCollectionV1Args {
                name: params.collection.name.clone(),
                uri: params.collection.uri.clone(),
                plugins: None,
            },
        )?;

        Ok(Instruction::new_with_bytes(
            MPL_CORE_PROGRAM_ID,
            &data,
            vec![
                AccountMeta::new(accounts.collection, true),
                AccountMeta::new_readonly(accounts.authority, false),
                AccountMeta::new(accounts.authority, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
        ))
    }

    fn initialize_machine(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
    ) -> Result<Instruction, TransactionError> {
        let data = anchor_data("initialize", &CandyMachineData::from(params))?;

        Ok(Instruction::new_with_bytes(
            CANDY_MACHINE_PROGRAM_ID,
            &data,
            vec![
                AccountMeta::new(accounts.candy_machine, false),
                AccountMeta::new(Self::authority_pda(&accounts.candy_machine), false),
                AccountMeta::new_readonly(accounts.authority, false),
                AccountMeta::new(accounts.authority, true),
                AccountMeta::new(accounts.collection, false),
                AccountMeta::new_readonly(accounts.authority, true),
                AccountMeta::new_readonly(MPL_CORE_PROGRAM_ID, false),
                AccountMeta::new_readonly(system_program::ID, false),
                AccountMeta::new_readonly(sysvar::instructions::ID, false),
            ],
        ))
    }

    fn initialize_guard(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
    ) -> Result<Instruction, TransactionError> {
        let data = anchor_data("initialize", &encode_guard_data(&params.guards)?)?;

        Ok(Instruction::new_with_bytes(
            CANDY_GUARD_PROGRAM_ID,
            &data,
            vec![
                AccountMeta::new(Self::candy_guard_pda(&accounts.candy_machine), false),
                AccountMeta::new_readonly(accounts.candy_machine, true),
                AccountMeta::new_readonly(accounts.authority, false),
                AccountMeta::new(accounts.authority, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
        ))
    }

    fn wrap(&self, accounts: &CreationAccounts) -> Result<Instruction, TransactionError> {
        let data = anchor_data("wrap", &())?;

        Ok(Instruction::new_with_bytes(
            CANDY_GUARD_PROGRAM_ID,
            &data,
            vec![
                AccountMeta::new_readonly(Self::candy_guard_pda(&accounts.candy_machine), false),
                AccountMeta::new_readonly(accounts.authority, true),
                AccountMeta::new(accounts.candy_machine, false),
                AccountMeta::new_readonly(CANDY_MACHINE_PROGRAM_ID, false),
                AccountMeta::new_readonly(accounts.authority, true),
            ],
        ))
    }
}

impl InstructionFactory for CandyMachineInstructionFactory {
    fn machine_account_size(&self, params: &CreationParams) -> usize {
        let items = params.items_available as usize;
        let settings = &params.config_line_settings;
        let config_line_size = (settings.name_length + settings.uri_length) as usize;

        CANDY_MACHINE_HEADER_SIZE
            + CANDY_MACHINE_DATA_SIZE
            // items loaded + config lines
            + 4
            + items * config_line_size
            // loaded bitmask
            + 4
            + (items / 8 + 1)
            // mint indices
            + 4
            + items * 4
    }

    fn create_machine(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
        machine_rent_lamports: u64,
    ) -> Result<Vec<Instruction>, TransactionError> {
        let create_account = system_instruction::create_account(
            &accounts.authority,
            &accounts.candy_machine,
            machine_rent_lamports,
            self.machine_account_size(params) as u64,
            &CANDY_MACHINE_PROGRAM_ID,
        );

        Ok(vec![
            self.create_collection(params, accounts)?,
            create_account,
            self.initialize_machine(params, accounts)?,
            self.initialize_guard(params, accounts)?,
            self.wrap(accounts)?,
        ])
    }

    fn add_config_lines(
        &self,
        candy_machine: &Pubkey,
        authority: &Pubkey,
        index: u32,
        config_lines: &[ConfigLine],
    ) -> Result<Instruction, TransactionError> {
        let data = anchor_data(
            "add_config_lines",
            &AddConfigLinesArgs::new(index, config_lines),
        )?;

        Ok(Instruction::new_with_bytes(
            CANDY_MACHINE_PROGRAM_ID,
            &data,
            vec![
                AccountMeta::new(*candy_machine, false),
                AccountMeta::new_readonly(*authority, true),
            ],
        ))
    }

    fn set_compute_unit_limit(&self, units: u32) -> Instruction {
        ComputeBudgetInstruction::set_compute_unit_limit(units)
    }

    fn mint(
        &self,
        accounts: &MintAccounts,
        guards: &GuardSet,
    ) -> Result<Instruction, TransactionError> {
        let data = anchor_data(
            "mint_v1",
            &MintV1Args {
                mint_args: Vec::new(),
                label: None,
            },
        )?;

        let mut metas = vec![
            AccountMeta::new_readonly(Self::candy_guard_pda(&accounts.candy_machine), false),
            AccountMeta::new_readonly(CANDY_MACHINE_PROGRAM_ID, false),
            AccountMeta::new(accounts.candy_machine, false),
            AccountMeta::new(Self::authority_pda(&accounts.candy_machine), false),
            AccountMeta::new(accounts.minter, true),
            AccountMeta::new(accounts.minter, true),
            AccountMeta::new_readonly(accounts.owner, false),
            AccountMeta::new(accounts.asset, true),
            AccountMeta::new(accounts.collection, false),
            AccountMeta::new_readonly(MPL_CORE_PROGRAM_ID, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::instructions::ID, false),
            AccountMeta::new_readonly(sysvar::slot_hashes::ID, false),
        ];

        // remaining accounts, in guard order
        if let Some(sol_payment) = &guards.sol_payment {
            metas.push(AccountMeta::new(sol_payment.destination, false));
        }

        Ok(Instruction::new_with_bytes(CANDY_GUARD_PROGRAM_ID, &data, metas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::creation_params;

    fn creation_accounts() -> CreationAccounts {
        CreationAccounts {
            candy_machine: Pubkey::new_unique(),
            collection: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
        }
    }

    #[test]
    fn test_create_machine_instruction_group() {
        let factory = CandyMachineInstructionFactory::new();
        let accounts = creation_accounts();
        let params = creation_params(accounts.authority);

        let instructions = factory.create_machine(&params, &accounts, 5_000).unwrap();
        let programs: Vec<Pubkey> = instructions.iter().map(|ix| ix.program_id).collect();
        assert_eq!(
            programs,
            vec![
                MPL_CORE_PROGRAM_ID,
                system_program::ID,
                CANDY_MACHINE_PROGRAM_ID,
                CANDY_GUARD_PROGRAM_ID,
                CANDY_GUARD_PROGRAM_ID,
            ]
        );

        // the ephemeral keys sign their own account creation
        let signers: Vec<Pubkey> = instructions
            .iter()
            .flat_map(|ix| ix.accounts.iter())
            .filter(|meta| meta.is_signer)
            .map(|meta| meta.pubkey)
            .collect();
        assert!(signers.contains(&accounts.collection));
        assert!(signers.contains(&accounts.candy_machine));
        assert!(signers.contains(&accounts.authority));
    }

    #[test]
    fn test_account_size_grows_with_items() {
        let factory = CandyMachineInstructionFactory::new();
        let mut params = creation_params(Pubkey::new_unique());
        let small = factory.machine_account_size(&params);
        params.items_available = 100;
        let large = factory.machine_account_size(&params);
        assert!(large > small);
        assert_eq!(large - small, 98 * (10 + 26 + 4) + (100 / 8 - 2 / 8));
    }

    #[test]
    fn test_add_config_lines_targets_machine() {
        let factory = CandyMachineInstructionFactory::new();
        let machine = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let params = creation_params(authority);

        let ix = factory
            .add_config_lines(&machine, &authority, 0, &params.config_lines)
            .unwrap();
        assert_eq!(ix.program_id, CANDY_MACHINE_PROGRAM_ID);
        assert_eq!(ix.accounts[0].pubkey, machine);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(
            &ix.data[..8],
            &crate::utils::anchor_instruction_discriminator("add_config_lines")
        );
    }

    #[test]
    fn test_mint_appends_payment_destination() {
        let factory = CandyMachineInstructionFactory::new();
        let destination = Pubkey::new_unique();
        let params = creation_params(destination);
        let accounts = MintAccounts {
            candy_machine: Pubkey::new_unique(),
            collection: Pubkey::new_unique(),
            asset: Pubkey::new_unique(),
            minter: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
        };

        let ix = factory.mint(&accounts, &params.guards).unwrap();
        assert_eq!(ix.program_id, CANDY_GUARD_PROGRAM_ID);
        assert_eq!(ix.accounts.last().unwrap().pubkey, destination);
        let owner = ix
            .accounts
            .iter()
            .find(|meta| meta.pubkey == accounts.owner)
            .unwrap();
        assert!(!owner.is_signer);

        let without_payment = factory.mint(&accounts, &GuardSet::default()).unwrap();
        assert_eq!(without_payment.accounts.len(), ix.accounts.len() - 1);
    }

    #[test]
    fn test_pdas_are_deterministic() {
        let machine = Pubkey::new_unique();
        assert_eq!(
            CandyMachineInstructionFactory::authority_pda(&machine),
            CandyMachineInstructionFactory::authority_pda(&machine)
        );
        assert_ne!(
            CandyMachineInstructionFactory::authority_pda(&machine),
            CandyMachineInstructionFactory::candy_guard_pda(&machine)
        );
    }
}
