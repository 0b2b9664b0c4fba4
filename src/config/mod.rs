//! Configuration: server settings from the environment and candy machine
//! settings from a JSON file.

mod config_file;
pub use config_file::*;

mod server_config;
pub use server_config::*;
