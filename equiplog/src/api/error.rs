//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::{CommonError, EquipError};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub EquipError);

impl From<EquipError> for AppError {
    fn from(err: EquipError) -> Self {
        AppError(err)
    }
}

impl AppError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            EquipError::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            EquipError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EquipError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EquipError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EquipError::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            EquipError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        // 詳細はサーバーログのみに出し、クライアントにはexternal_messageを返す
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        let payload = json!({
            "error": self.0.external_message()
        });

        (status, Json(payload)).into_response()
    }
}
