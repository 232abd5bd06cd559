//! 貸出・返却の記録
//!
//! 入力の必須チェックのみ行い、レコードを作成してログストアに追記する。
//! 貸出中かどうかの突き合わせは行わない（ログを読む担当者に任せる）。

use crate::common::{
    error::{EquipError, EquipResult},
    types::{EquipmentType, LogRecord},
};
use crate::store::LogStore;
use std::sync::Arc;
use tracing::info;

/// 貸出・返却レコーダー
#[derive(Clone)]
pub struct TransactionRecorder {
    store: Arc<dyn LogStore>,
}

impl TransactionRecorder {
    /// ストアを指定して作成
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    /// 貸出を記録
    ///
    /// 機材種別・機材番号・承認者のいずれかが空なら何も書き込まずに
    /// バリデーションエラーを返す。
    pub async fn record_checkout(
        &self,
        equipment_type: &str,
        equipment_number: &str,
        approver: &str,
    ) -> EquipResult<LogRecord> {
        let equipment_type = required("equipmentType", equipment_type)?;
        let equipment_number = required("equipmentNumber", equipment_number)?;
        let approver = required("staffApproval", approver)?;

        let record = LogRecord::checkout(
            EquipmentType::new(equipment_type),
            equipment_number,
            approver,
        );
        self.store.append(&record).await?;

        info!(
            id = %record.id,
            equipment_type = %record.equipment_type,
            equipment_number = %record.equipment_number,
            "Equipment checked out"
        );
        Ok(record)
    }

    /// 返却を記録
    pub async fn record_return(
        &self,
        equipment_type: &str,
        equipment_number: &str,
    ) -> EquipResult<LogRecord> {
        let equipment_type = required("equipmentType", equipment_type)?;
        let equipment_number = required("equipmentNumber", equipment_number)?;

        let record = LogRecord::returned(EquipmentType::new(equipment_type), equipment_number);
        self.store.append(&record).await?;

        info!(
            id = %record.id,
            equipment_type = %record.equipment_type,
            equipment_number = %record.equipment_number,
            "Equipment returned"
        );
        Ok(record)
    }
}

/// 空白のみも未入力として扱い、前後の空白を除いた値を返す
fn required<'a>(field: &str, value: &'a str) -> EquipResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EquipError::validation(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(trimmed)
}
