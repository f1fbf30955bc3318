mod cli;
mod commands;
mod error;
mod logging;
mod utils;

use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    info!("🚀 oxPDB CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = commands::convert::run(&cli);

    match &command_result {
        Ok(_) => {
            info!("✅ Conversion completed successfully.");
            println!("✅ Conversion completed successfully.");
        }
        Err(e) => {
            error!("❌ Conversion failed: {}", e);
            eprintln!("❌ Conversion failed: {}", e);
        }
    }

    command_result
}
