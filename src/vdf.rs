//! VDF module - LaunchOptions surgery on Steam's localconfig.vdf
//!
//! The config is treated as flat text: objects are located by key and
//! depth-counted brace matching, scalar fields by regex, and only the
//! `LaunchOptions` lines of eligible apps are ever rewritten.
//!
//! ## Module Structure
//! - `types.rs`: Spans, app entries, edit operations, errors
//! - `pure/`: Scanner, locator, field reader, planner, applier
//! - `operations/`: File read, atomic write, mtime touch
//! - `pipelines/`: Editor pass and single-app check

mod operations;
mod pipelines;
pub mod pure;
mod types;

pub use pipelines::{check_app_has_launch_options, set_launch_options_for_all_apps};
