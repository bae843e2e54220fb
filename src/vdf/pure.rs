//! Pure functions for the VDF module
//!
//! Everything here works on an in-memory buffer; nothing touches the disk.

pub mod apply;
pub mod fields;
pub mod locator;
pub mod planner;
pub mod scanner;

pub use apply::{apply_edits, validate_edit};
pub use fields::{app_entry, read_field};
pub use locator::{AppIter, find_app, locate_object};
pub use planner::{PlanOutcome, plan_app};
