//! ログ閲覧・エクスポートAPI
//!
//! `GET /api/getAllLogs` は新しい順の一覧、`POST /api/logs` はzipアーカイブを返す。

use super::error::AppError;
use crate::common::protocol::{ExportRequest, LogsResponse, MessageResponse};
use crate::export::{ExportOutcome, ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME, NOTHING_TO_EXPORT};
use crate::store::sort_newest_first;
use crate::AppState;
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

/// GET /api/getAllLogs - 全レコードを新しい順に返す
pub async fn get_all_logs(State(state): State<AppState>) -> Result<Json<LogsResponse>, AppError> {
    let mut logs = state.store.list_all().await?;
    sort_newest_first(&mut logs);
    Ok(Json(LogsResponse { logs }))
}

/// POST /api/logs - 全レコードをzipでダウンロード
///
/// パスワード不一致は401。レコードが0件の場合はアーカイブではなく
/// 200でメッセージを返す。
pub async fn export_logs(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let grant = state
        .exporter
        .authenticate(req.password.as_deref().unwrap_or_default())
        .await?;

    match state.exporter.export_archive(&grant).await? {
        ExportOutcome::Empty => Ok(Json(MessageResponse::new(NOTHING_TO_EXPORT)).into_response()),
        ExportOutcome::Archive(archive) => {
            let headers = [
                (header::CONTENT_TYPE, ARCHIVE_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={}", ARCHIVE_FILE_NAME),
                ),
                (header::CONTENT_LENGTH, archive.size().to_string()),
            ];
            Ok((headers, Body::from_stream(archive.into_stream())).into_response())
        }
    }
}
