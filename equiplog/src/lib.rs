//! 機材貸出ログサーバー
//!
//! 充電器・ヘッドホン・Chromebook等の貸出/返却を追記専用ログとして記録し、
//! パスワード付きで全ログをzipアーカイブとしてエクスポートする。

#![warn(missing_docs)]

/// 共通型定義（equiplog-commonの再エクスポート）
pub use equiplog_common as common;

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エクスポート用資格情報
pub mod credential;

/// ログアーカイブのエクスポート
pub mod export;

/// ロギング初期化ユーティリティ
pub mod logging;

/// パスワードハッシュ
pub mod password;

/// 貸出・返却の記録
pub mod recorder;

/// axumサーバー起動
pub mod server;

/// ログストア
pub mod store;

use common::{config::StoreConfig, error::EquipResult};
use credential::CredentialStore;
use export::ArchiveExporter;
use recorder::TransactionRecorder;
use std::sync::Arc;
use store::LogStore;

/// アプリケーション状態
///
/// リクエスト間で共有する可変状態は持たない。各リクエストはストアから読み直す。
#[derive(Clone)]
pub struct AppState {
    /// ログストア
    pub store: Arc<dyn LogStore>,
    /// 貸出・返却レコーダー
    pub recorder: Arc<TransactionRecorder>,
    /// アーカイブエクスポーター
    pub exporter: Arc<ArchiveExporter>,
}

impl AppState {
    /// ストアと資格情報から状態を組み立てる
    pub fn new(store: Arc<dyn LogStore>, credentials: CredentialStore) -> Self {
        Self {
            recorder: Arc::new(TransactionRecorder::new(store.clone())),
            exporter: Arc::new(ArchiveExporter::new(store.clone(), credentials)),
            store,
        }
    }

    /// 設定からストアを開いて状態を組み立てる
    pub async fn from_config(config: &StoreConfig) -> EquipResult<Self> {
        config.validate()?;
        let store = store::open(config).await?;
        let credentials =
            CredentialStore::new(config.credential_path(), config.initial_secret());
        Ok(Self::new(store, credentials))
    }
}
