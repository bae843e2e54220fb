//! Operations module (atomic side effects)

mod io;

pub use io::{read_config, touch_mtime, write_config_atomic};
