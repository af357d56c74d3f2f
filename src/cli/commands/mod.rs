//! Command implementation modules

pub mod clean;
pub mod clear_history;
pub mod history;
pub mod status;
pub mod version;

pub use clean::run_clean_command;
pub use clear_history::run_clear_history_command;
pub use history::run_history_command;
pub use status::{run_operations_command, run_status_command};
pub use version::run_version_command;
