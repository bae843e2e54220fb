//! Pipelines module (orchestration)

pub mod launch;

pub use launch::Launch;
