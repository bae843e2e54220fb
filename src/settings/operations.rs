//! Operations module (atomic side effects)

mod io;

pub use io::{load_settings, save_settings};
