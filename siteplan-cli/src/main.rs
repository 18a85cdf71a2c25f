use clap::Parser;
use tracing::{debug, info};

mod cli;
mod commands;
mod config;
mod error;
mod logging;

use cli::Cli;
use error::CliError;
use logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    info!("siteplan starting");
    debug!("CLI arguments: {:?}", cli);

    match cli.run().await {
        Ok(_) => {
            debug!("siteplan finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!("CLI error: {:?}", e);
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
