//! Validated account identity supplied by API callers.

use std::{fmt, str::FromStr};

use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{ACCOUNT_IDENTITY_BYTES, ACCOUNT_IDENTITY_MAX_LEN, ACCOUNT_IDENTITY_MIN_LEN},
    models::TransactionError,
};

pub const INVALID_PUBLIC_KEY_FORMAT: &str = "Invalid public key format";
pub const MISSING_USER_PUBKEY: &str = "Missing userPubkey (undefined or empty)";

/// A base58 public key that passed length and decoding checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountIdentity(Pubkey);

impl AccountIdentity {
    pub fn pubkey(&self) -> &Pubkey {
        &self.0
    }

    /// Parses the optional `userPubkey` field of a request body.
    pub fn from_request(user_pubkey: Option<&str>) -> Result<Self, TransactionError> {
        match user_pubkey {
            Some(value) if !value.is_empty() => value.parse(),
            _ => Err(TransactionError::InvalidAccountIdentity(
                MISSING_USER_PUBKEY.to_string(),
            )),
        }
    }
}

impl FromStr for AccountIdentity {
    type Err = TransactionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !(ACCOUNT_IDENTITY_MIN_LEN..=ACCOUNT_IDENTITY_MAX_LEN).contains(&value.len()) {
            return Err(TransactionError::InvalidAccountIdentity(
                INVALID_PUBLIC_KEY_FORMAT.to_string(),
            ));
        }

        let bytes = bs58::decode(value).into_vec().map_err(|e| {
            log::debug!("Rejected account identity {value}: {e}");
            TransactionError::InvalidAccountIdentity(INVALID_PUBLIC_KEY_FORMAT.to_string())
        })?;

        let bytes: [u8; ACCOUNT_IDENTITY_BYTES] = bytes.try_into().map_err(|_| {
            TransactionError::InvalidAccountIdentity(INVALID_PUBLIC_KEY_FORMAT.to_string())
        })?;

        Ok(Self(Pubkey::new_from_array(bytes)))
    }
}

impl From<Pubkey> for AccountIdentity {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
