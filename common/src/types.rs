//! 共通型定義
//!
//! 貸出・返却ログレコードと機材種別

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// レコード種別
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// 貸出
    Checkout,
    /// 返却
    Return,
}

impl RecordKind {
    /// 小文字表記（JSON・ファイル名で使用）
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Checkout => "checkout",
            RecordKind::Return => "return",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 機材種別
///
/// 画面で選択肢として出すのは [`EquipmentType::KNOWN`] の4種類だが、
/// サーバー側では閉じた集合として扱わず任意の文字列を受け付ける。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EquipmentType(String);

impl EquipmentType {
    /// 充電器
    pub const CHARGER: &'static str = "Charger";
    /// ヘッドホン
    pub const HEADPHONES: &'static str = "Headphones";
    /// Chromebook
    pub const CHROMEBOOK: &'static str = "Chromebook";
    /// その他
    pub const OTHER: &'static str = "Other";

    /// 既知の機材種別
    pub const KNOWN: [&'static str; 4] = [
        Self::CHARGER,
        Self::HEADPHONES,
        Self::CHROMEBOOK,
        Self::OTHER,
    ];

    /// 新しい機材種別を作成
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 文字列表現
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 既知の種別かどうか（大文字小文字は区別しない）
    pub fn is_known(&self) -> bool {
        Self::KNOWN
            .iter()
            .any(|known| known.eq_ignore_ascii_case(&self.0))
    }
}

impl Default for EquipmentType {
    fn default() -> Self {
        Self::new(Self::CHARGER)
    }
}

impl From<&str> for EquipmentType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EquipmentType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 貸出・返却ログレコード
///
/// 一度永続化されたレコードは変更されない。JSONのフィールド名は
/// 既存のログファイルと互換性を保つため `type` / `staffApproval` を使う。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// 一意識別子
    pub id: Uuid,
    /// レコード種別
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// 機材種別
    pub equipment_type: EquipmentType,
    /// 機材番号
    pub equipment_number: String,
    /// 承認したスタッフ名（貸出時のみ）
    #[serde(
        rename = "staffApproval",
        alias = "approver",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub approver: Option<String>,
    /// 作成日時（UTC）
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// 貸出レコードを作成
    pub fn checkout(
        equipment_type: EquipmentType,
        equipment_number: impl Into<String>,
        approver: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: RecordKind::Checkout,
            equipment_type,
            equipment_number: equipment_number.into(),
            approver: Some(approver.into()),
            timestamp: Utc::now(),
        }
    }

    /// 返却レコードを作成
    pub fn returned(equipment_type: EquipmentType, equipment_number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: RecordKind::Return,
            equipment_type,
            equipment_number: equipment_number.into(),
            approver: None,
            timestamp: Utc::now(),
        }
    }

    /// 永続化単位の名前
    ///
    /// `<kind>_<unix millis>_<id>.json` 形式。IDを含むため同一ミリ秒内でも衝突しない。
    pub fn unit_name(&self) -> String {
        format!(
            "{}_{}_{}.json",
            self.kind,
            self.timestamp.timestamp_millis(),
            self.id
        )
    }
}
