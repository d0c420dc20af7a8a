use anyhow::{Context, Result};
use clap::Parser;
use tba_source::cli::{Cli, CliHandler};
use tba_source::{initialize_logging, ReportConfig};
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        ReportConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.source.data_dir = data_dir;
    }

    initialize_logging(&config.logging)?;
    info!("Starting team-report v{}", env!("CARGO_PKG_VERSION"));
    info!("Match data directory: {:?}", config.source.data_dir);

    let handler = CliHandler::new(config);
    match handler.handle_command(cli.command) {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => {
            error!("Failed to build report: {:#}", e);
            Err(e)
        }
    }
}
