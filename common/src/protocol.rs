//! HTTPリクエスト/レスポンス型
//!
//! フィールドは camelCase。必須項目の欠落はデシリアライズでは弾かず、
//! 空文字として受け取ったうえでバリデーションエラーにする。

use crate::types::LogRecord;
use serde::{Deserialize, Serialize};

/// 貸出リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// 機材種別
    #[serde(default)]
    pub equipment_type: Option<String>,
    /// 機材番号
    #[serde(default)]
    pub equipment_number: Option<String>,
    /// 承認スタッフ名
    #[serde(default, alias = "approver")]
    pub staff_approval: Option<String>,
}

/// 返却リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    /// 機材種別
    #[serde(default)]
    pub equipment_type: Option<String>,
    /// 機材番号
    #[serde(default)]
    pub equipment_number: Option<String>,
}

/// ログエクスポートリクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRequest {
    /// 共有パスワード
    #[serde(default)]
    pub password: Option<String>,
}

/// 貸出・返却の成功レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    /// 表示用メッセージ
    pub message: String,
    /// 作成されたレコード
    pub log_entry: LogRecord,
}

/// ログ一覧レスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsResponse {
    /// ログレコード（新しい順）
    pub logs: Vec<LogRecord>,
}

/// メッセージのみのレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    /// 表示用メッセージ
    pub message: String,
}

impl MessageResponse {
    /// メッセージから作成
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// バージョン情報レスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionResponse {
    /// サーバーバージョン
    pub version: String,
    /// ログストアのバックエンド名
    pub backend: String,
}
