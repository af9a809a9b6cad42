//! Command handlers for CLI operations
//!
//! Each handler owns the execution of one subcommand, separate from parsing
//! and configuration merging.

pub mod keygen;
pub mod serve;

pub use keygen::KeygenCommandHandler;
pub use serve::ServeCommandHandler;
