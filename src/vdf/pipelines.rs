//! Pipelines module (orchestration)

mod check_app;
mod update_all;

pub use check_app::check_app_has_launch_options;
pub use update_all::set_launch_options_for_all_apps;
