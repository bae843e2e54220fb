//! Compose module - launch-time command line reconstruction
//!
//! This module provides:
//! - Parsing of launch option strings into env / prefix / suffix parts
//! - Composition of the enabled rules around the game's own argv
//! - Process replacement with a fallback to the untouched argv
//!
//! ## Module Structure
//! - `types.rs`: Parsed options, compositions, errors
//! - `pure/`: Parser and composer
//! - `operations/`: exec, program lookup, launch log
//! - `pipelines/`: The `Parse -> Compose -> Exec-or-Fallback` launcher

mod operations;
mod pipelines;
pub mod pure;
mod types;

pub use pipelines::Launch;
