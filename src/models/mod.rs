mod account_identity;
pub use account_identity::*;

mod app_state;
pub use app_state::*;

mod candy_machine;
pub use candy_machine::*;

mod error;
pub use error::*;

mod transaction;
pub use transaction::*;
