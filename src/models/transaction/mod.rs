mod encoded;
pub use encoded::*;

mod status;
pub use status::*;

mod template;
pub use template::*;
