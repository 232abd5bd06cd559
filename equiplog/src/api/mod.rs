//! REST APIハンドラー
//!
//! 貸出・返却の記録、ログ一覧、ログエクスポート

pub mod error;
pub mod logs;
pub mod system;
pub mod transactions;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/checkout", post(transactions::checkout))
        .route("/api/return", post(transactions::return_equipment))
        .route("/api/getAllLogs", get(logs::get_all_logs))
        .route("/api/logs", post(logs::export_logs))
        .route("/api/version", get(system::get_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
