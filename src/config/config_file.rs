//! Candy machine creation settings loaded from a JSON file.
//!
//! Amounts are written in SOL and converted to lamports at load. When the
//! file does not exist the built-in collection of two items is used.
//!
//! ```json
//! {
//!   "itemsAvailable": 2,
//!   "configLines": [{ "name": "1", "uri": "1.json" }, { "name": "2", "uri": "2.json" }],
//!   "guards": { "botTax": { "sol": 0.001, "lastInstruction": true }, "solPayment": { "sol": 1.0 } }
//! }
//! ```

use std::{fs, path::Path, str::FromStr};

use log::info;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::{
    constants::{
        DEFAULT_BOT_TAX_SOL, DEFAULT_COLLECTION_NAME, DEFAULT_COLLECTION_URI,
        DEFAULT_COMPUTE_UNIT_LIMIT, DEFAULT_SOL_PAYMENT_SOL,
    },
    models::{
        BotTaxGuard, CollectionSettings, ConfigLine, ConfigLineSettings, CreationParams, GuardSet,
        SolPaymentGuard,
    },
    utils::sol_to_lamports_checked,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount { field: String, value: f64 },
    #[error("Invalid public key for {field}: {value}")]
    InvalidPubkey { field: String, value: String },
    #[error("Invalid candy machine settings: {0}")]
    InvalidParameters(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLineFileConfig {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigLineSettingsFileConfig {
    pub prefix_name: String,
    pub name_length: u32,
    pub prefix_uri: String,
    pub uri_length: u32,
    pub is_sequential: bool,
}

impl Default for ConfigLineSettingsFileConfig {
    fn default() -> Self {
        Self {
            prefix_name: "My NFT #".to_string(),
            name_length: 10,
            prefix_uri: "https://example.com/".to_string(),
            uri_length: 26,
            is_sequential: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BotTaxFileConfig {
    pub sol: f64,
    #[serde(default = "default_true")]
    pub last_instruction: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SolPaymentFileConfig {
    pub sol: f64,
    /// Defaults to the server key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GuardsFileConfig {
    pub bot_tax: Option<BotTaxFileConfig>,
    pub sol_payment: Option<SolPaymentFileConfig>,
}

impl Default for GuardsFileConfig {
    fn default() -> Self {
        Self {
            bot_tax: Some(BotTaxFileConfig {
                sol: DEFAULT_BOT_TAX_SOL,
                last_instruction: true,
            }),
            sol_payment: Some(SolPaymentFileConfig {
                sol: DEFAULT_SOL_PAYMENT_SOL,
                destination: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionFileConfig {
    pub name: String,
    pub uri: String,
}

impl Default for CollectionFileConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COLLECTION_NAME.to_string(),
            uri: DEFAULT_COLLECTION_URI.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CandyMachineFileConfig {
    pub items_available: u64,
    pub is_mutable: bool,
    pub config_line_settings: ConfigLineSettingsFileConfig,
    pub config_lines: Vec<ConfigLineFileConfig>,
    pub guards: GuardsFileConfig,
    pub compute_unit_limit: u32,
    pub collection: CollectionFileConfig,
}

impl Default for CandyMachineFileConfig {
    fn default() -> Self {
        Self {
            items_available: 2,
            is_mutable: false,
            config_line_settings: ConfigLineSettingsFileConfig::default(),
            config_lines: vec![
                ConfigLineFileConfig {
                    name: "1".to_string(),
                    uri: "1.json".to_string(),
                },
                ConfigLineFileConfig {
                    name: "2".to_string(),
                    uri: "2.json".to_string(),
                },
            ],
            guards: GuardsFileConfig::default(),
            compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            collection: CollectionFileConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn lamports(field: &str, sol: f64) -> Result<u64, ConfigError> {
    sol_to_lamports_checked(sol).ok_or_else(|| ConfigError::InvalidAmount {
        field: field.to_string(),
        value: sol,
    })
}

impl CandyMachineFileConfig {
    /// Reads `dir/file_name`, or returns the defaults when the file is absent.
    pub fn load(dir: impl AsRef<Path>, file_name: &str) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(file_name);
        if !path.exists() {
            info!(
                "No candy machine config at {}; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&config_str)?;
        info!("Loaded candy machine config from {}", path.display());
        Ok(config)
    }

    /// Converts to creation parameters. A SOL payment without an explicit
    /// destination pays `default_destination`.
    pub fn into_creation_params(
        self,
        default_destination: Pubkey,
    ) -> Result<CreationParams, ConfigError> {
        let bot_tax = self
            .guards
            .bot_tax
            .map(|guard| {
                Ok::<_, ConfigError>(BotTaxGuard {
                    lamports: lamports("guards.botTax.sol", guard.sol)?,
                    last_instruction: guard.last_instruction,
                })
            })
            .transpose()?;

        let sol_payment = self
            .guards
            .sol_payment
            .map(|guard| {
                let destination = match guard.destination {
                    Some(value) => {
                        Pubkey::from_str(&value).map_err(|_| ConfigError::InvalidPubkey {
                            field: "guards.solPayment.destination".to_string(),
                            value,
                        })?
                    }
                    None => default_destination,
                };
                Ok::<_, ConfigError>(SolPaymentGuard {
                    lamports: lamports("guards.solPayment.sol", guard.sol)?,
                    destination,
                })
            })
            .transpose()?;

        let params = CreationParams {
            items_available: self.items_available,
            is_mutable: self.is_mutable,
            config_line_settings: ConfigLineSettings {
                prefix_name: self.config_line_settings.prefix_name,
                name_length: self.config_line_settings.name_length,
                prefix_uri: self.config_line_settings.prefix_uri,
                uri_length: self.config_line_settings.uri_length,
                is_sequential: self.config_line_settings.is_sequential,
            },
            config_lines: self
                .config_lines
                .into_iter()
                .map(|line| ConfigLine {
                    name: line.name,
                    uri: line.uri,
                })
                .collect(),
            guards: GuardSet {
                bot_tax,
                sol_payment,
            },
            compute_unit_limit: self.compute_unit_limit,
            collection: CollectionSettings {
                name: self.collection.name,
                uri: self.collection.uri,
            },
        };

        params
            .validate()
            .map_err(|e| ConfigError::InvalidParameters(e.details().to_string()))?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::creation_params;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_match_built_in_collection() {
        let destination = Pubkey::new_unique();
        let params = CandyMachineFileConfig::default()
            .into_creation_params(destination)
            .unwrap();
        assert_eq!(params, creation_params(destination));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = CandyMachineFileConfig::load(dir.path(), "config.json").unwrap();
        assert_eq!(config, CandyMachineFileConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("config.json")).unwrap();
        write!(
            file,
            r#"{{
                "itemsAvailable": 1,
                "configLines": [{{ "name": "only", "uri": "only.json" }}],
                "guards": {{ "botTax": null, "solPayment": {{ "sol": 0.5 }} }}
            }}"#
        )
        .unwrap();

        let config = CandyMachineFileConfig::load(dir.path(), "config.json").unwrap();
        assert_eq!(config.items_available, 1);
        assert_eq!(config.compute_unit_limit, DEFAULT_COMPUTE_UNIT_LIMIT);

        let destination = Pubkey::new_unique();
        let params = config.into_creation_params(destination).unwrap();
        assert!(params.guards.bot_tax.is_none());
        let payment = params.guards.sol_payment.unwrap();
        assert_eq!(payment.lamports, 500_000_000);
        assert_eq!(payment.destination, destination);
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{ not json").unwrap();
        assert!(matches!(
            CandyMachineFileConfig::load(dir.path(), "config.json"),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut config = CandyMachineFileConfig::default();
        if let Some(bot_tax) = config.guards.bot_tax.as_mut() {
            bot_tax.sol = -0.001;
        }
        assert!(matches!(
            config.into_creation_params(Pubkey::new_unique()),
            Err(ConfigError::InvalidAmount { ref field, .. }) if field == "guards.botTax.sol"
        ));
    }

    #[test]
    fn test_explicit_destination_must_be_pubkey() {
        let mut config = CandyMachineFileConfig::default();
        if let Some(payment) = config.guards.sol_payment.as_mut() {
            payment.destination = Some("not-a-key".to_string());
        }
        assert!(matches!(
            config.into_creation_params(Pubkey::new_unique()),
            Err(ConfigError::InvalidPubkey { .. })
        ));
    }

    #[test]
    fn test_item_count_mismatch_rejected() {
        let config = CandyMachineFileConfig {
            items_available: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.into_creation_params(Pubkey::new_unique()),
            Err(ConfigError::InvalidParameters(_))
        ));
    }
}
