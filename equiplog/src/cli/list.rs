//! list subcommand
//!
//! Prints every stored record, newest first, without starting the server.

use super::StoreArgs;
use crate::common::error::{CommonError, EquipResult};
use crate::common::types::LogRecord;
use crate::store::{self, sort_newest_first};
use clap::Args;

/// Arguments for the list subcommand
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Print records as a JSON array
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Store options
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute the list command
pub async fn execute(args: &ListArgs) -> EquipResult<()> {
    let store = store::open(&args.store.to_config()).await?;
    let mut records = store.list_all().await?;
    sort_newest_first(&mut records);

    if args.json {
        let body = serde_json::to_string_pretty(&records).map_err(CommonError::from)?;
        println!("{}", body);
        return Ok(());
    }

    if records.is_empty() {
        println!("No logs available yet");
        return Ok(());
    }

    println!("TIMESTAMP\t\t\tTYPE\t\tEQUIPMENT\tNUMBER\tAPPROVER");
    for record in &records {
        println!("{}", format_row(record));
    }
    Ok(())
}

fn format_row(record: &LogRecord) -> String {
    format!(
        "{}\t{:<8}\t{:<10}\t{}\t{}",
        record.timestamp.to_rfc3339(),
        record.kind,
        record.equipment_type,
        record.equipment_number,
        record.approver.as_deref().unwrap_or("-")
    )
}
