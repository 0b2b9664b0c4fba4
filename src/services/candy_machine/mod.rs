//! Instruction assembly for the candy machine programs.
//!
//! The pipeline only talks to [`InstructionFactory`]; byte layouts, program
//! addresses and account ordering live behind it.
#[cfg(test)]
use mockall::automock;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::models::{ConfigLine, CreationAccounts, CreationParams, GuardSet, MintAccounts, TransactionError};

mod factory;
pub use factory::*;

mod layout;

#[cfg_attr(test, automock)]
pub trait InstructionFactory: Send + Sync {
    /// Size in bytes of the candy machine account for `params`.
    fn machine_account_size(&self, params: &CreationParams) -> usize;

    /// Instructions that create the collection, the candy machine account,
    /// the machine itself and its guard.
    fn create_machine(
        &self,
        params: &CreationParams,
        accounts: &CreationAccounts,
        machine_rent_lamports: u64,
    ) -> Result<Vec<Instruction>, TransactionError>;

    fn add_config_lines(
        &self,
        candy_machine: &Pubkey,
        authority: &Pubkey,
        index: u32,
        config_lines: &[ConfigLine],
    ) -> Result<Instruction, TransactionError>;

    fn set_compute_unit_limit(&self, units: u32) -> Instruction;

    fn mint(
        &self,
        accounts: &MintAccounts,
        guards: &GuardSet,
    ) -> Result<Instruction, TransactionError>;
}
