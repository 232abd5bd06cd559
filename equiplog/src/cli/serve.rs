//! serve サブコマンド
//!
//! HTTPサーバーを起動します。

use super::StoreArgs;
use crate::common::config::ServerConfig;
use crate::common::error::EquipResult;
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "3000", env = "EQUIPLOG_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "EQUIPLOG_HOST")]
    pub host: String,

    /// Store options
    #[command(flatten)]
    pub store: StoreArgs,
}

/// serve サブコマンドを実行
pub async fn execute(args: &ServeArgs) -> EquipResult<()> {
    let server = ServerConfig {
        host: args.host.clone(),
        port: args.port,
    };
    crate::server::run(server, args.store.to_config()).await
}
