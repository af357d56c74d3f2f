//! Application module
//!
//! Logging setup and the wiring of services from configuration.

pub mod logging;
pub mod runtime;

pub use logging::init_logging;
pub use runtime::AppContext;
