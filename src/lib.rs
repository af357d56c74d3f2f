//! # memclean
//!
//! Clears Windows memory lists through the external `EmptyStandbyList` tool,
//! measures free memory before and after, and keeps a CSV history of what
//! each cleanup freed.
//!
//! ## Usage
//!
//! ```bash
//! memclean clean [--op TOKEN]...
//! memclean history [--sort freed]
//! ```
//!
//! ## Modules
//!
//! - `cleanup` - Operation catalogue, sequential orchestration and the cleanup service
//! - `history` - Append-only CSV history with sorted and paged views
//! - `memory` - Memory snapshots and the sampler seam
//! - `subprocess` - Process runner abstraction with a mock for tests
//! - `version` - Installed-version marker and latest-release checks
//! - `config` - Configuration from file, environment and flags
//! - `app` - Logging and service wiring
//! - `cli` - Command-line surface
pub mod app;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod memory;
pub mod subprocess;
pub mod version;

pub use error::{Error, Result};
