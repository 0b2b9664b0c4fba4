//! Fee-payer substitution.
//!
//! A compiled message is decompiled into instructions, then recompiled with
//! a different fee payer against the same blockhash. Account privileges
//! come from the message header, so every account keeps the signer and
//! writable roles it had at message level. An old payer that no instruction
//! references drops out of the account table.

use log::{debug, warn};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    message::{Message, MessageHeader},
    signature::Signature,
    transaction::Transaction,
};

use crate::models::{AccountIdentity, TransactionError};

fn is_signer_index(header: &MessageHeader, index: usize) -> bool {
    index < header.num_required_signatures as usize
}

fn is_writable_index(header: &MessageHeader, num_keys: usize, index: usize) -> bool {
    let num_signed = header.num_required_signatures as usize;
    if index < num_signed {
        index < num_signed.saturating_sub(header.num_readonly_signed_accounts as usize)
    } else {
        index < num_keys.saturating_sub(header.num_readonly_unsigned_accounts as usize)
    }
}

/// Rebuilds the instruction list of a compiled message, in order.
pub fn decompile_instructions(message: &Message) -> Result<Vec<Instruction>, TransactionError> {
    let keys = &message.account_keys;
    let lookup = |index: u8| {
        keys.get(index as usize).copied().ok_or_else(|| {
            TransactionError::Serialization(format!(
                "instruction references account index {index}, message has {} accounts",
                keys.len()
            ))
        })
    };

    message
        .instructions
        .iter()
        .map(|compiled| {
            let program_id = lookup(compiled.program_id_index)?;
            let accounts = compiled
                .accounts
                .iter()
                .map(|&index| {
                    let pubkey = lookup(index)?;
                    let index = index as usize;
                    Ok(AccountMeta {
                        pubkey,
                        is_signer: is_signer_index(&message.header, index),
                        is_writable: is_writable_index(&message.header, keys.len(), index),
                    })
                })
                .collect::<Result<Vec<_>, TransactionError>>()?;

            Ok(Instruction {
                program_id,
                accounts,
                data: compiled.data.clone(),
            })
        })
        .collect()
}

/// Recompiles `transaction` with `new_payer` as fee payer.
///
/// The result is unsigned: any signature on the input covered the old
/// message and is discarded.
pub fn rebind_fee_payer(
    transaction: &Transaction,
    new_payer: &AccountIdentity,
) -> Result<Transaction, TransactionError> {
    let instructions = decompile_instructions(&transaction.message)?;

    let discarded = transaction
        .signatures
        .iter()
        .filter(|signature| **signature != Signature::default())
        .count();
    if discarded > 0 {
        warn!(
            "Rebinding fee payer to {new_payer} invalidates {discarded} existing signature(s)"
        );
    }

    let message = Message::new_with_blockhash(
        &instructions,
        Some(new_payer.pubkey()),
        &transaction.message.recent_blockhash,
    );
    debug!(
        "Rebound fee payer {:?} -> {} ({} instructions, {} required signatures)",
        transaction.message.account_keys.first(),
        new_payer,
        message.instructions.len(),
        message.header.num_required_signatures
    );

    Ok(Transaction::new_unsigned(message))
}
