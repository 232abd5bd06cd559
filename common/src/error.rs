//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `EquipError`は`external_message()`を提供し、内部の詳細（パスやOSエラー）を
//! クライアントに漏らさないメッセージを返す。詳細は`Display`でサーバーログにのみ出す。

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// equiplog error type
#[derive(Debug, Error)]
pub enum EquipError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Durable medium unavailable or write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored unit could not be parsed
    #[error("Parse error in {unit}: {reason}")]
    Parse {
        /// 永続化単位の名前
        unit: String,
        /// 失敗理由
        reason: String,
    },

    /// Authentication error (wrong shared secret)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EquipError {
    /// Shorthand for a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Common(CommonError::Validation(message.into()))
    }

    /// Whether the client caused this error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Common(CommonError::Validation(_)) | Self::Authentication(_)
        )
    }

    /// Returns a safe error message for external clients.
    ///
    /// Validation messages are returned as-is since they only name the missing field.
    pub fn external_message(&self) -> String {
        match self {
            Self::Common(CommonError::Validation(message)) => message.clone(),
            Self::Common(_) => "Request error".to_string(),
            Self::Storage(_) => "Storage unavailable".to_string(),
            Self::Parse { .. } => "Stored data is corrupted".to_string(),
            Self::Authentication(_) => "Invalid password".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// equiplog Result type
pub type EquipResult<T> = Result<T, EquipError>;
