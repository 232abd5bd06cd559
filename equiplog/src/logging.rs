//! ロギング初期化
//!
//! `EQUIPLOG_LOG_LEVEL`（なければ`RUST_LOG`、どちらもなければ`info`）でフィルタし、
//! `EQUIPLOG_LOG_FORMAT` が `json` ならJSON行、それ以外はテキストで標準出力へ出す。

use crate::config::get_env_with_fallback;
use std::str::FromStr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// ログ出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 人が読むテキスト
    #[default]
    Text,
    /// 1行1JSON
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

impl LogFormat {
    /// 環境変数から取得（不正な値はテキスト扱い）
    pub fn from_env() -> Self {
        std::env::var("EQUIPLOG_LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// ログレベルのフィルタ文字列
pub fn filter_directive() -> String {
    get_env_with_fallback("EQUIPLOG_LOG_LEVEL", "RUST_LOG")
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// グローバルサブスクライバーを初期化
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(filter_directive())
        .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))?;

    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .try_init()?,
        LogFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .try_init()?,
    }

    Ok(())
}
