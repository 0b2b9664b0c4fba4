//! Borsh layouts of instruction arguments.
//!
//! Public keys are carried as raw 32-byte arrays.

use borsh::BorshSerialize;

use crate::{
    models::{BotTaxGuard, ConfigLine, CreationParams, GuardSet, SolPaymentGuard, TransactionError},
    utils::anchor_instruction_discriminator,
};

const BOT_TAX_FEATURE: u64 = 1 << 0;
const SOL_PAYMENT_FEATURE: u64 = 1 << 1;

#[derive(BorshSerialize)]
pub(super) struct CreateCollectionV1Args {
    pub name: String,
    pub uri: String,
    /// No plugins are attached to the collection.
    pub plugins: Option<Vec<u8>>,
}

#[derive(BorshSerialize)]
pub(super) struct ConfigLineSettingsData {
    pub prefix_name: String,
    pub name_length: u32,
    pub prefix_uri: String,
    pub uri_length: u32,
    pub is_sequential: bool,
}

#[derive(BorshSerialize)]
pub(super) struct HiddenSettingsData {
    pub name: String,
    pub uri: String,
    pub hash: [u8; 32],
}

#[derive(BorshSerialize)]
pub(super) struct CandyMachineData {
    pub items_available: u64,
    pub max_supply: u64,
    pub is_mutable: bool,
    pub config_line_settings: Option<ConfigLineSettingsData>,
    pub hidden_settings: Option<HiddenSettingsData>,
}

impl From<&CreationParams> for CandyMachineData {
    fn from(params: &CreationParams) -> Self {
        let settings = &params.config_line_settings;
        Self {
            items_available: params.items_available,
            max_supply: 0,
            is_mutable: params.is_mutable,
            config_line_settings: Some(ConfigLineSettingsData {
                prefix_name: settings.prefix_name.clone(),
                name_length: settings.name_length,
                prefix_uri: settings.prefix_uri.clone(),
                uri_length: settings.uri_length,
                is_sequential: settings.is_sequential,
            }),
            hidden_settings: None,
        }
    }
}

#[derive(BorshSerialize)]
pub(super) struct ConfigLineData {
    pub name: String,
    pub uri: String,
}

#[derive(BorshSerialize)]
pub(super) struct AddConfigLinesArgs {
    pub index: u32,
    pub config_lines: Vec<ConfigLineData>,
}

impl AddConfigLinesArgs {
    pub fn new(index: u32, config_lines: &[ConfigLine]) -> Self {
        Self {
            index,
            config_lines: config_lines
                .iter()
                .map(|line| ConfigLineData {
                    name: line.name.clone(),
                    uri: line.uri.clone(),
                })
                .collect(),
        }
    }
}

#[derive(BorshSerialize)]
pub(super) struct MintV1Args {
    /// Guard-specific mint arguments. Neither bot tax nor SOL payment
    /// takes any.
    pub mint_args: Vec<u8>,
    pub label: Option<String>,
}

/// Guard set encoding: a feature bitmask followed by the data of every
/// enabled guard in bit order, then the (absent) group list.
pub(super) fn encode_guard_data(guards: &GuardSet) -> Result<Vec<u8>, TransactionError> {
    let mut features = 0u64;
    let mut body = Vec::new();

    if let Some(BotTaxGuard {
        lamports,
        last_instruction,
    }) = &guards.bot_tax
    {
        features |= BOT_TAX_FEATURE;
        write_borsh(&mut body, &(*lamports, *last_instruction))?;
    }

    if let Some(SolPaymentGuard {
        lamports,
        destination,
    }) = &guards.sol_payment
    {
        features |= SOL_PAYMENT_FEATURE;
        write_borsh(&mut body, &(*lamports, destination.to_bytes()))?;
    }

    let mut data = Vec::with_capacity(8 + body.len() + 1);
    write_borsh(&mut data, &features)?;
    data.extend_from_slice(&body);
    write_borsh(&mut data, &Option::<Vec<u8>>::None)?;
    Ok(data)
}

fn write_borsh<T: BorshSerialize>(buffer: &mut Vec<u8>, value: &T) -> Result<(), TransactionError> {
    value
        .serialize(buffer)
        .map_err(|e| TransactionError::Serialization(e.to_string()))
}

/// Anchor discriminator followed by the borsh-encoded arguments.
pub(super) fn anchor_data<T: BorshSerialize>(
    name: &str,
    args: &T,
) -> Result<Vec<u8>, TransactionError> {
    let mut data = anchor_instruction_discriminator(name).to_vec();
    write_borsh(&mut data, args)?;
    Ok(data)
}

/// Single-byte enum tag followed by the borsh-encoded arguments.
pub(super) fn tagged_data<T: BorshSerialize>(
    tag: u8,
    args: &T,
) -> Result<Vec<u8>, TransactionError> {
    let mut data = vec![tag];
    write_borsh(&mut data, args)?;
    Ok(data)
}
