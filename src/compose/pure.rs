//! Pure functions for the compose module
//!
//! These functions have no side effects and are deterministic.

mod build;
mod parse;

pub use build::Composer;
pub use parse::is_env_assignment;
