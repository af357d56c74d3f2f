//! Command routing and execution

use anyhow::Result;

use crate::app::AppContext;
use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::config::Config;

/// Configuration from file and environment with command-line overrides on top.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(tool) = &cli.tool {
        config.tool_path = tool.clone();
    }
    Ok(config)
}

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands, config: Config) -> Result<()> {
    let ctx = AppContext::new(config);
    match command {
        Commands::Status => run_status_command(&ctx)?,
        Commands::Operations => run_operations_command()?,
        Commands::Clean { operations, json } => {
            run_clean_command(&ctx, &operations, json).await?
        }
        Commands::History {
            sort,
            ascending,
            page,
            page_size,
        } => run_history_command(&ctx, sort, ascending, page, page_size)?,
        Commands::ClearHistory { yes } => run_clear_history_command(&ctx, yes)?,
        Commands::Version => run_version_command(&ctx).await?,
    }
    Ok(())
}
