//! Small shared helpers.

pub mod clock;
pub mod validate;
