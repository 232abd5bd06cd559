//! 貸出・返却APIハンドラー

use super::error::AppError;
use crate::common::protocol::{CheckoutRequest, RecordResponse, ReturnRequest};
use crate::AppState;
use axum::{extract::State, Json};

/// POST /api/checkout - 貸出を記録
pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = state
        .recorder
        .record_checkout(
            req.equipment_type.as_deref().unwrap_or_default(),
            req.equipment_number.as_deref().unwrap_or_default(),
            req.staff_approval.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(RecordResponse {
        message: "Equipment checked out successfully".to_string(),
        log_entry: record,
    }))
}

/// POST /api/return - 返却を記録
pub async fn return_equipment(
    State(state): State<AppState>,
    Json(req): Json<ReturnRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = state
        .recorder
        .record_return(
            req.equipment_type.as_deref().unwrap_or_default(),
            req.equipment_number.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(RecordResponse {
        message: "Equipment returned successfully".to_string(),
        log_entry: record,
    }))
}
