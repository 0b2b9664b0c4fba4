//! Program ids, account layout sizes and defaults for the candy machine
//! programs targeted by the instruction factory.

use solana_sdk::{pubkey, pubkey::Pubkey};

/// Core candy machine program.
pub const CANDY_MACHINE_PROGRAM_ID: Pubkey = pubkey!("CMACYFENjoBMHzapRXyo1JZkVS6EtaDDzbjMpHqiqRw8");

/// Core candy guard program.
pub const CANDY_GUARD_PROGRAM_ID: Pubkey = pubkey!("CMAGAKJ67e9hRZgfC5SFTbZH8MgEmtqazKXjmkaJjWTJ");

/// Core asset program, owner of collections and minted assets.
pub const MPL_CORE_PROGRAM_ID: Pubkey = pubkey!("CoREENxT6tW1HoK8ypY1SxRMZTcVPm7R94rH4PZNhX7d");

pub const CANDY_MACHINE_AUTHORITY_SEED: &[u8] = b"candy_machine";
pub const CANDY_GUARD_SEED: &[u8] = b"candy_guard";

/// Index of `CreateCollectionV1` in the core program's instruction enum.
pub const MPL_CORE_CREATE_COLLECTION_V1: u8 = 1;

// discriminator + version + features + authority + mint authority
// + collection mint + items redeemed
pub const CANDY_MACHINE_HEADER_SIZE: usize = 8 + 1 + 6 + 32 + 32 + 32 + 8;

// items available + max supply + is mutable
// + config line settings option (tag, prefix name, name length, prefix uri, uri length, sequential)
// + hidden settings option (tag, name, uri, hash)
pub const CANDY_MACHINE_DATA_SIZE: usize =
    8 + 8 + 1 + (1 + 4 + 32 + 4 + 4 + 200 + 4 + 1) + (1 + 4 + 32 + 4 + 200 + 32);

pub const MAX_CONFIG_LINE_NAME_LENGTH: u32 = 32;
pub const MAX_CONFIG_LINE_URI_LENGTH: u32 = 200;

pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 800_000;
pub const DEFAULT_BOT_TAX_SOL: f64 = 0.001;
pub const DEFAULT_SOL_PAYMENT_SOL: f64 = 1.0;

pub const CREATE_SUCCESS_MESSAGE: &str = "Candy Machine creation transaction built successfully";
pub const CREATE_FAILURE_MESSAGE: &str = "Candy machine creation failed";
pub const MINT_SUCCESS_MESSAGE: &str = "NFT minted successfully";
pub const MINT_FAILURE_MESSAGE: &str = "Minting from Candy Machine failed";

pub const DEFAULT_COLLECTION_NAME: &str = "My Collection";
pub const DEFAULT_COLLECTION_URI: &str = "https://example.com/collection.json";
