//! Equiplog Server Entry Point

use clap::Parser;
use equiplog::cli::{self, Cli, Commands};
use equiplog::common::error::EquipResult;
use equiplog::{config, logging, server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(parsed: Cli) -> EquipResult<()> {
    match parsed.command {
        Some(Commands::Serve(args)) => cli::serve::execute(&args).await,
        Some(Commands::List(args)) => cli::list::execute(&args).await,
        Some(Commands::Export(args)) => cli::export::execute(&args).await,
        None => {
            let store = config::store_config_from_env()?;
            server::run(config::server_config_from_env(), store).await
        }
    }
}
