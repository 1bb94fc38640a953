//! Command implementations for the techops CLI.

pub mod actions;
pub mod browse;
pub mod completions;
pub mod config;
pub mod list;

pub use actions::{run_add, run_status, run_unlock};
pub use browse::run_browse;
pub use completions::generate_completions;
pub use config::run_config;
pub use list::run_list;
