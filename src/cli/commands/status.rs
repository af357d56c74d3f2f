use crate::app::AppContext;
use crate::cli::display::{show_memory, show_operations};
use crate::error::Result;

/// Show memory statistics. A failed query prints a warning and a zeroed
/// snapshot rather than failing the command.
pub fn run_status_command(ctx: &AppContext) -> Result<()> {
    let (snapshot, err) = ctx.sampler.sample_or_zeroed();
    if let Some(e) = err {
        eprintln!("⚠️  Warning: could not read memory statistics: {e}");
    }
    show_memory("Memory Information", &snapshot);
    Ok(())
}

pub fn run_operations_command() -> Result<()> {
    println!("Available cleanup operations:");
    show_operations();
    Ok(())
}
