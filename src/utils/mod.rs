mod base64;
pub use base64::*;

mod discriminator;
pub use discriminator::*;

mod lamports;
pub use lamports::*;
