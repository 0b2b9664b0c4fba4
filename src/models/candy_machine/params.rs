//! Creation parameters for a candy machine and its guard set.

use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{MAX_COMPUTE_UNIT_LIMIT, MAX_CONFIG_LINE_NAME_LENGTH, MAX_CONFIG_LINE_URI_LENGTH},
    models::TransactionError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLine {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLineSettings {
    pub prefix_name: String,
    pub name_length: u32,
    pub prefix_uri: String,
    pub uri_length: u32,
    pub is_sequential: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotTaxGuard {
    pub lamports: u64,
    pub last_instruction: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolPaymentGuard {
    pub lamports: u64,
    pub destination: Pubkey,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardSet {
    pub bot_tax: Option<BotTaxGuard>,
    pub sol_payment: Option<SolPaymentGuard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSettings {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreationParams {
    pub items_available: u64,
    pub is_mutable: bool,
    pub config_line_settings: ConfigLineSettings,
    pub config_lines: Vec<ConfigLine>,
    pub guards: GuardSet,
    pub compute_unit_limit: u32,
    pub collection: CollectionSettings,
}

impl CreationParams {
    /// Checks the parameters before anything touches the network.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.items_available == 0 {
            return Err(TransactionError::InvalidParameters(
                "itemsAvailable must be greater than zero".to_string(),
            ));
        }

        if self.items_available != self.config_lines.len() as u64 {
            return Err(TransactionError::InvalidParameters(format!(
                "itemsAvailable ({}) does not match the number of config lines ({})",
                self.items_available,
                self.config_lines.len()
            )));
        }

        if self.compute_unit_limit == 0 || self.compute_unit_limit > MAX_COMPUTE_UNIT_LIMIT {
            return Err(TransactionError::InvalidParameters(format!(
                "computeUnitLimit must be between 1 and {MAX_COMPUTE_UNIT_LIMIT}, got {}",
                self.compute_unit_limit
            )));
        }

        self.validate_config_lines()
    }

    fn validate_config_lines(&self) -> Result<(), TransactionError> {
        let settings = &self.config_line_settings;

        if settings.name_length > MAX_CONFIG_LINE_NAME_LENGTH
            || settings.uri_length > MAX_CONFIG_LINE_URI_LENGTH
        {
            return Err(TransactionError::InvalidParameters(format!(
                "config line lengths exceed the maximum (name {MAX_CONFIG_LINE_NAME_LENGTH}, uri {MAX_CONFIG_LINE_URI_LENGTH})"
            )));
        }

        for (index, line) in self.config_lines.iter().enumerate() {
            if line.name.len() > settings.name_length as usize {
                return Err(TransactionError::InvalidParameters(format!(
                    "config line {index}: name '{}' exceeds nameLength {}",
                    line.name, settings.name_length
                )));
            }
            if line.uri.len() > settings.uri_length as usize {
                return Err(TransactionError::InvalidParameters(format!(
                    "config line {index}: uri '{}' exceeds uriLength {}",
                    line.uri, settings.uri_length
                )));
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::creation_params;
    use super::*;

    #[test]
    fn test_valid_params() {
        assert!(creation_params(Pubkey::new_unique()).validate().is_ok());
    }

    #[test]
    fn test_item_count_must_match_config_lines() {
        let mut params = creation_params(Pubkey::new_unique());
        params.items_available = 10;
        let err = params.validate().unwrap_err();
        assert!(matches!(err, TransactionError::InvalidParameters(ref msg) if msg.contains("(10)")));
    }

    #[test]
    fn test_zero_items_rejected() {
        let mut params = creation_params(Pubkey::new_unique());
        params.items_available = 0;
        params.config_lines.clear();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_compute_unit_limit_bounds() {
        let mut params = creation_params(Pubkey::new_unique());
        params.compute_unit_limit = 0;
        assert!(params.validate().is_err());
        params.compute_unit_limit = MAX_COMPUTE_UNIT_LIMIT + 1;
        assert!(params.validate().is_err());
        params.compute_unit_limit = MAX_COMPUTE_UNIT_LIMIT;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_config_line_must_fit_lengths() {
        let mut params = creation_params(Pubkey::new_unique());
        params.config_lines[1].uri = "a-much-longer-uri-than-allowed.json".to_string();
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("config line 1"));
    }
}
