//! # Repository Module
//!
//! Request-scoped state kept between API calls.

mod machine;
pub use machine::*;
