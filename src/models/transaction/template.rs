//! Unsigned transaction templates.
//!
//! A template is the ordered instruction list plus the fee payer and the
//! blockhash it will be compiled against. Instruction order is fixed at
//! construction and nothing downstream reorders it.

use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};

use crate::models::TransactionError;

/// Logical step an instruction belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub enum InstructionStage {
    Create,
    AddConfigLines,
    SetComputeLimit,
    Mint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagedInstruction {
    pub stage: InstructionStage,
    pub instruction: Instruction,
}

impl StagedInstruction {
    pub fn new(stage: InstructionStage, instruction: Instruction) -> Self {
        Self { stage, instruction }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTemplate {
    instructions: Vec<StagedInstruction>,
    fee_payer: Pubkey,
    recent_blockhash: Hash,
    last_valid_block_height: u64,
}

impl TransactionTemplate {
    /// Builds a template, rejecting an empty instruction list.
    pub fn new(
        instructions: Vec<StagedInstruction>,
        fee_payer: Pubkey,
        recent_blockhash: Hash,
        last_valid_block_height: u64,
    ) -> Result<Self, TransactionError> {
        if instructions.is_empty() {
            return Err(TransactionError::InvalidParameters(
                "transaction template has no instructions".to_string(),
            ));
        }

        Ok(Self {
            instructions,
            fee_payer,
            recent_blockhash,
            last_valid_block_height,
        })
    }

    pub fn instructions(&self) -> &[StagedInstruction] {
        &self.instructions
    }

    /// Stage of every instruction, in order.
    pub fn stages(&self) -> Vec<InstructionStage> {
        self.instructions.iter().map(|ix| ix.stage).collect()
    }

    pub fn fee_payer(&self) -> &Pubkey {
        &self.fee_payer
    }

    pub fn recent_blockhash(&self) -> &Hash {
        &self.recent_blockhash
    }

    pub fn last_valid_block_height(&self) -> u64 {
        self.last_valid_block_height
    }

    /// Compiles the template into an unsigned legacy transaction.
    pub fn compile(&self) -> Transaction {
        let instructions: Vec<Instruction> = self
            .instructions
            .iter()
            .map(|staged| staged.instruction.clone())
            .collect();
        let message =
            Message::new_with_blockhash(&instructions, Some(&self.fee_payer), &self.recent_blockhash);
        Transaction::new_unsigned(message)
    }
}
