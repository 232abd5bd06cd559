//! 設定管理
//!
//! ServerConfig, StoreConfig等の設定構造体

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// エクスポート用パスワードが未設定の場合に使う初期値
///
/// 推測されやすい値のため、運用では `EQUIPLOG_EXPORT_PASSWORD` で上書きすること。
pub const DEFAULT_EXPORT_PASSWORD: &str = "MHS";

/// エクスポート用パスワードの最大バイト数
///
/// bcryptは73バイト目以降を無視するため、これより長いパスワードは受け付けない。
pub const MAX_SECRET_BYTES: usize = 72;

/// サーバー設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 3000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// ログストアのバックエンド
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// 1レコード1ファイルのJSON
    #[default]
    File,
    /// SQLite（1レコード1行）
    Sqlite,
}

impl StoreBackend {
    /// 小文字表記
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::File => "file",
            StoreBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "files" | "json" => Ok(StoreBackend::File),
            "sqlite" | "db" => Ok(StoreBackend::Sqlite),
            other => Err(CommonError::Config(format!(
                "Unknown store backend '{}': expected 'file' or 'sqlite'",
                other
            ))),
        }
    }
}

/// ストア設定
///
/// データディレクトリ配下のレイアウト:
/// - `logs/` 1レコード1ファイル（fileバックエンド）
/// - `equiplog.db` SQLiteデータベース（sqliteバックエンド）
/// - `cred.json` エクスポート用資格情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// データディレクトリ (デフォルト: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// バックエンド (デフォルト: file)
    #[serde(default)]
    pub backend: StoreBackend,

    /// 資格情報が未作成のときに設定する初期パスワード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_password: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl StoreConfig {
    /// データディレクトリを指定して作成
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// バックエンドを指定
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    /// 初期パスワードを指定
    pub fn with_export_password(mut self, password: impl Into<String>) -> Self {
        self.export_password = Some(password.into());
        self
    }

    /// レコードファイルのディレクトリ
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// SQLiteデータベースのパス
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("equiplog.db")
    }

    /// 資格情報ファイルのパス
    pub fn credential_path(&self) -> PathBuf {
        self.data_dir.join("cred.json")
    }

    /// 資格情報の初期値
    pub fn initial_secret(&self) -> &str {
        match self.export_password.as_deref() {
            Some(password) if !password.is_empty() => password,
            _ => DEFAULT_EXPORT_PASSWORD,
        }
    }

    /// 組み込みの初期パスワードにフォールバックしているか
    pub fn uses_default_secret(&self) -> bool {
        !matches!(self.export_password.as_deref(), Some(p) if !p.is_empty())
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.initial_secret().len() > MAX_SECRET_BYTES {
            return Err(CommonError::Config(format!(
                "Export password must be at most {} bytes",
                MAX_SECRET_BYTES
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: StoreBackend::default(),
            export_password: None,
        }
    }
}
