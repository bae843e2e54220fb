//! Operations module (atomic side effects)

pub mod exec;
pub mod launch_log;

pub use exec::{exec_argv, program_exists};
pub use launch_log::write_launch_log;
