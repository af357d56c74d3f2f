//! CLI command handlers
//!
//! Argument parsing, command implementations and terminal rendering.

pub mod args;
pub mod commands;
pub mod display;
pub mod router;

pub use args::{Cli, Commands};
pub use router::{execute_command, resolve_config};
