//! Logging configuration and initialization

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
///
/// Without `-v`, a level from configuration wins over the default.
pub fn log_level(verbose: u8, configured: Option<&str>) -> String {
    match (verbose, configured) {
        (0, Some(level)) if !level.trim().is_empty() => level.trim().to_string(),
        (0, _) => "info".to_string(),
        (1, _) => "debug".to_string(),
        (2, _) => "trace".to_string(),
        _ => "trace,hyper=debug,reqwest=debug".to_string(),
    }
}

/// Initialize tracing/logging for the application. `RUST_LOG` overrides
/// the computed level when set.
pub fn init_logging(verbose: u8, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, configured)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("memclean started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
