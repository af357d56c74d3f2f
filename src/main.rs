use clap::Parser;
use memclean::app::init_logging;
use memclean::cli::{execute_command, resolve_config, Cli};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, config.log_level.as_deref());

    if let Err(e) = execute_command(cli.command, config).await {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e}");
        if cli.verbose >= 1 {
            for (i, cause) in e.chain().enumerate().skip(1) {
                eprintln!("  {i}: {cause}");
            }
        }
        std::process::exit(1);
    }
}
