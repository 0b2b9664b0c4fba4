mod accounts;
pub use accounts::*;

mod params;
pub use params::*;

mod record;
pub use record::*;

mod request;
pub use request::*;

mod response;
pub use response::*;
