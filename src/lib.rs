//! Candy machine co-signing service.
//!
//! Builds candy machine creation transactions for a browser wallet, rebinds the
//! fee payer to that wallet, partially signs them with a server-held key and
//! hands them back for the wallet to co-sign. Also mints from the machine most
//! recently created for a wallet.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod utils;
