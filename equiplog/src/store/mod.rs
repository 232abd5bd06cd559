//! ログストア
//!
//! 追記専用のレコード永続化。1レコードを独立した単位（ファイルまたは行）として保存するため、
//! 書き込み途中の失敗が他のレコードを壊すことはない。
//!
//! `list_all` は順序を保証しない。表示用の並び替えは [`sort_newest_first`] で行う。

pub mod file;
pub mod sqlite;

use crate::common::{
    config::{StoreBackend, StoreConfig},
    error::EquipResult,
    types::LogRecord,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub use file::FileLogStore;
pub use sqlite::SqliteLogStore;

/// ログストアの契約
#[async_trait]
pub trait LogStore: Send + Sync {
    /// バックエンド名
    fn backend(&self) -> &'static str;

    /// 保存先を作成する（冪等）。新規ストアのレコード数は0
    async fn ensure_initialized(&self) -> EquipResult<()>;

    /// レコードを1件、永続化が完了してから返る
    ///
    /// 失敗時はレコードが保存されたと仮定してはならない。
    async fn append(&self, record: &LogRecord) -> EquipResult<()>;

    /// 永続化済みの全レコード
    ///
    /// 解析できない単位はログに記録してスキップする。
    async fn list_all(&self) -> EquipResult<Vec<LogRecord>>;
}

/// タイムスタンプ降順（新しい順）に並べる
///
/// 同一時刻のレコードはID順にして結果を決定的にする。
pub fn sort_newest_first(records: &mut [LogRecord]) {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// 設定に従ってストアを開き、初期化する
pub async fn open(config: &StoreConfig) -> EquipResult<Arc<dyn LogStore>> {
    let store: Arc<dyn LogStore> = match config.backend {
        StoreBackend::File => Arc::new(FileLogStore::new(config.logs_dir())),
        StoreBackend::Sqlite => Arc::new(SqliteLogStore::connect(&config.database_path()).await?),
    };
    store.ensure_initialized().await?;

    info!(
        backend = store.backend(),
        data_dir = %config.data_dir.display(),
        "Log store initialized"
    );
    Ok(store)
}
