//! CLI module for equiplog
//!
//! Provides the server entry point plus offline commands that operate
//! directly on the data directory.

pub mod export;
pub mod list;
pub mod serve;

use crate::common::config::{StoreBackend, StoreConfig};
use crate::config::{export_password_from_env, parse_backend};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Equipment checkout log - Records equipment checkouts and returns
#[derive(Parser, Debug)]
#[command(name = "equiplog")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    EQUIPLOG_HOST             Bind address (default: 0.0.0.0)
    EQUIPLOG_PORT             Listen port (default: 3000)
    EQUIPLOG_DATA_DIR         Data directory (default: data)
    EQUIPLOG_STORE_BACKEND    Storage backend: file | sqlite (default: file)
    EQUIPLOG_EXPORT_PASSWORD  Initial export password (used on first run only)
    EQUIPLOG_LOG_LEVEL        Log level (default: info)
    EQUIPLOG_LOG_FORMAT       Log format: text | json (default: text)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Print all records, newest first
    List(list::ListArgs),
    /// Write all records to a zip archive
    Export(export::ExportArgs),
}

/// ストア関連の共通引数
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Data directory
    #[arg(long, default_value = "data", env = "EQUIPLOG_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Storage backend (file | sqlite)
    #[arg(
        long,
        default_value = "file",
        env = "EQUIPLOG_STORE_BACKEND",
        value_parser = parse_backend
    )]
    pub backend: StoreBackend,
}

impl StoreArgs {
    /// 引数と環境変数から `StoreConfig` を組み立てる
    pub fn to_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.data_dir.clone()).with_backend(self.backend);
        match export_password_from_env() {
            Some(secret) => config.with_export_password(secret),
            None => config,
        }
    }
}
