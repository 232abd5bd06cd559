//! ファイルベースのログストア
//!
//! 1レコード1JSONファイル。一時ファイルに書き込んで`fsync`した後、
//! 最終名へアトミックにリネームする。

use super::LogStore;
use crate::common::{
    error::{CommonError, EquipError, EquipResult},
    types::LogRecord,
};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const RECORD_EXTENSION: &str = "json";

/// ファイルベースのログストア
#[derive(Debug, Clone)]
pub struct FileLogStore {
    dir: PathBuf,
}

impl FileLogStore {
    /// レコードディレクトリを指定して作成（ディレクトリはまだ作らない）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// レコードディレクトリ
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_unit(&self, tmp_path: &Path, final_path: &Path, body: &[u8]) -> EquipResult<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(tmp_path)
            .await
            .map_err(|e| storage_error("create", tmp_path, e))?;
        file.write_all(body)
            .await
            .map_err(|e| storage_error("write", tmp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("sync", tmp_path, e))?;
        drop(file);

        fs::rename(tmp_path, final_path)
            .await
            .map_err(|e| storage_error("rename", final_path, e))
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn ensure_initialized(&self) -> EquipResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("create directory", &self.dir, e))
    }

    async fn append(&self, record: &LogRecord) -> EquipResult<()> {
        let unit = record.unit_name();
        let final_path = self.dir.join(&unit);
        let tmp_path = self.dir.join(format!(".{}.tmp", unit));
        let body = serde_json::to_vec_pretty(record).map_err(CommonError::from)?;

        if let Err(err) = self.write_unit(&tmp_path, &final_path, &body).await {
            // 一時ファイルは一覧対象外だが残骸は消しておく
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err);
        }

        debug!(unit = %unit, "Log record written");
        Ok(())
    }

    async fn list_all(&self) -> EquipResult<Vec<LogRecord>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error("read directory", &self.dir, e)),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error("read directory", &self.dir, e))?
        {
            let path = entry.path();
            if !is_record_unit(&path) {
                continue;
            }
            match read_unit(&path).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Skipping unreadable log record");
                }
            }
        }

        Ok(records)
    }
}

/// 一覧対象のファイルか（隠しファイル・一時ファイル・JSON以外は除外）
fn is_record_unit(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with('.')
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RECORD_EXTENSION))
}

async fn read_unit(path: &Path) -> EquipResult<LogRecord> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|e| storage_error("read", path, e))?;
    serde_json::from_str(&contents).map_err(|e| EquipError::Parse {
        unit: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        reason: e.to_string(),
    })
}

fn storage_error(action: &str, path: &Path, err: std::io::Error) -> EquipError {
    EquipError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}
