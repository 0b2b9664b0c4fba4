//! Transaction pipeline: build, rebind, co-sign, submit.

mod builder;
pub use builder::*;

mod cosign;
pub use cosign::*;

mod rebind;
pub use rebind::*;

mod submit;
pub use submit::*;
