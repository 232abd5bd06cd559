//! SQLiteベースのログストア
//!
//! 1レコード1行。`body`列にレコードのJSONをそのまま保存する。

use super::LogStore;
use crate::common::{
    error::{CommonError, EquipError, EquipResult},
    types::LogRecord,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::warn;

/// SQLiteベースのログストア
#[derive(Clone)]
pub struct SqliteLogStore {
    pool: SqlitePool,
}

impl SqliteLogStore {
    /// データベースファイルに接続（存在しなければ作成）
    pub async fn connect(path: &Path) -> EquipResult<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                EquipError::Storage(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| EquipError::Storage(format!("Failed to open database: {}", e)))?;

        Ok(Self::from_pool(pool))
    }

    /// 既存の接続プールから作成
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogStore for SqliteLogStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ensure_initialized(&self) -> EquipResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| EquipError::Storage(format!("Migration failed: {}", e)))
    }

    async fn append(&self, record: &LogRecord) -> EquipResult<()> {
        let body = serde_json::to_string(record).map_err(CommonError::from)?;

        sqlx::query("INSERT INTO log_records (id, kind, timestamp, body) VALUES (?, ?, ?, ?)")
            .bind(record.id.to_string())
            .bind(record.kind.as_str())
            .bind(record.timestamp.to_rfc3339())
            .bind(&body)
            .execute(&self.pool)
            .await
            .map_err(|e| EquipError::Storage(format!("Failed to save record: {}", e)))?;

        Ok(())
    }

    async fn list_all(&self) -> EquipResult<Vec<LogRecord>> {
        let rows = sqlx::query_as::<_, (String, String)>("SELECT id, body FROM log_records")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| EquipError::Storage(format!("Failed to load records: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, body) in rows {
            match serde_json::from_str::<LogRecord>(&body) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(id = %id, error = %e, "Skipping unreadable log record");
                }
            }
        }
        Ok(records)
    }
}
