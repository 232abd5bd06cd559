//! export subcommand
//!
//! Writes the same archive `POST /api/logs` serves to a local file. The export
//! password is checked against the stored credential exactly as over HTTP.

use super::StoreArgs;
use crate::common::error::EquipResult;
use crate::AppState;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the export subcommand
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Destination zip file
    #[arg(short, long, default_value = "equipment_logs.zip")]
    pub output: PathBuf,

    /// Export password
    #[arg(long, env = "EQUIPLOG_EXPORT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Store options
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute the export command
pub async fn execute(args: &ExportArgs) -> EquipResult<()> {
    let state = AppState::from_config(&args.store.to_config()).await?;
    let grant = state.exporter.authenticate(&args.password).await?;

    match state.exporter.write_archive_to(&grant, &args.output).await? {
        Some(entries) => {
            info!(entries, path = %args.output.display(), "Archive written");
            println!("Wrote {} records to {}", entries, args.output.display());
        }
        None => println!("No logs available yet"),
    }
    Ok(())
}
