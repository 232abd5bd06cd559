//! ログアーカイブのエクスポート
//!
//! 共有パスワードで認証した後、全レコードを1レコード1エントリのzipにまとめる。
//! アーカイブはブロッキングスレッド上で匿名一時ファイルへ1エントリずつ書き出し、
//! 完成後にチャンク単位でストリーミングする（メモリ上に全体を保持しない）。

use crate::common::{
    error::{CommonError, EquipError, EquipResult},
    types::LogRecord,
};
use crate::credential::CredentialStore;
use crate::store::LogStore;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::task;
use tokio_util::io::ReaderStream;
use tracing::{info, warn};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// ダウンロード時のファイル名
pub const ARCHIVE_FILE_NAME: &str = "equipment_logs.zip";

/// アーカイブのContent-Type
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// エクスポート対象がないときのメッセージ
pub const NOTHING_TO_EXPORT: &str = "No logs available yet";

/// 認証済みであることを示すトークン
///
/// [`ArchiveExporter::authenticate`] の成功時にのみ得られる。
#[derive(Debug)]
pub struct ExportGrant {
    _private: (),
}

/// エクスポート結果
#[derive(Debug)]
pub enum ExportOutcome {
    /// レコードが1件もない（エラーではない）
    Empty,
    /// 完成したアーカイブ
    Archive(ArchiveFile),
}

/// 書き出し済みのzipアーカイブ（匿名一時ファイル、クローズ時に削除される）
#[derive(Debug)]
pub struct ArchiveFile {
    file: std::fs::File,
    entries: usize,
    size: u64,
}

impl ArchiveFile {
    /// エントリ数
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// バイト数
    pub fn size(&self) -> u64 {
        self.size
    }

    /// チャンク単位で読み出すストリームに変換
    pub fn into_stream(self) -> ReaderStream<tokio::fs::File> {
        ReaderStream::new(tokio::fs::File::from_std(self.file))
    }

    /// 先頭に巻き戻されたファイルとして取り出す
    pub fn into_file(self) -> std::fs::File {
        self.file
    }
}

/// アーカイブエクスポーター
pub struct ArchiveExporter {
    store: Arc<dyn LogStore>,
    credentials: CredentialStore,
}

impl ArchiveExporter {
    /// ストアと資格情報を指定して作成
    pub fn new(store: Arc<dyn LogStore>, credentials: CredentialStore) -> Self {
        Self { store, credentials }
    }

    /// 共有パスワードで認証
    ///
    /// 資格情報が未作成なら初期値で作成してから比較する。不一致なら
    /// `EquipError::Authentication` を返し、資格情報は変更しない。
    pub async fn authenticate(&self, supplied: &str) -> EquipResult<ExportGrant> {
        if self.credentials.verify(supplied).await? {
            Ok(ExportGrant { _private: () })
        } else {
            warn!("Export rejected: invalid password");
            Err(EquipError::Authentication("Invalid password".to_string()))
        }
    }

    /// 全レコードをアーカイブにまとめる
    ///
    /// 並び順は問わない。レコードが0件なら [`ExportOutcome::Empty`] を返す。
    pub async fn export_archive(&self, _grant: &ExportGrant) -> EquipResult<ExportOutcome> {
        let records = self.store.list_all().await?;
        if records.is_empty() {
            info!("Export requested but there are no log records");
            return Ok(ExportOutcome::Empty);
        }

        let archive = task::spawn_blocking(move || build_archive(&records))
            .await
            .map_err(|e| EquipError::Internal(format!("Failed to join archive builder: {}", e)))??;

        info!(
            entries = archive.entries(),
            bytes = archive.size(),
            "Export archive built"
        );
        Ok(ExportOutcome::Archive(archive))
    }

    /// アーカイブをファイルに書き出す
    ///
    /// # Returns
    /// * `Ok(Some(entries))` - 書き出したエントリ数
    /// * `Ok(None)` - レコードがなく、ファイルは作成していない
    pub async fn write_archive_to(
        &self,
        grant: &ExportGrant,
        path: &Path,
    ) -> EquipResult<Option<usize>> {
        let archive = match self.export_archive(grant).await? {
            ExportOutcome::Empty => return Ok(None),
            ExportOutcome::Archive(archive) => archive,
        };
        let entries = archive.entries();

        let mut source = tokio::fs::File::from_std(archive.into_file());
        let mut target = tokio::fs::File::create(path).await.map_err(|e| {
            EquipError::Storage(format!("Failed to create {}: {}", path.display(), e))
        })?;
        tokio::io::copy(&mut source, &mut target)
            .await
            .map_err(|e| EquipError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;
        target
            .sync_all()
            .await
            .map_err(|e| EquipError::Storage(format!("Failed to sync {}: {}", path.display(), e)))?;

        Ok(Some(entries))
    }
}

fn build_archive(records: &[LogRecord]) -> EquipResult<ArchiveFile> {
    let spool = tempfile::tempfile()
        .map_err(|e| EquipError::Storage(format!("Failed to create archive spool: {}", e)))?;

    let mut zip = ZipWriter::new(spool);
    for record in records {
        let body = serde_json::to_vec_pretty(record).map_err(CommonError::from)?;
        zip.start_file(record.unit_name(), entry_options())
            .map_err(archive_error)?;
        zip.write_all(&body)
            .map_err(|e| EquipError::Storage(format!("Failed to write archive entry: {}", e)))?;
    }

    let mut file = zip.finish().map_err(archive_error)?;
    let size = file
        .seek(SeekFrom::End(0))
        .and_then(|size| file.rewind().map(|_| size))
        .map_err(|e| EquipError::Storage(format!("Failed to rewind archive: {}", e)))?;

    Ok(ArchiveFile {
        file,
        entries: records.len(),
        size,
    })
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
}

fn archive_error(err: zip::result::ZipError) -> EquipError {
    EquipError::Internal(format!("Failed to build archive: {}", err))
}
