//! システム情報API

use crate::common::protocol::VersionResponse;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/version - サーバーバージョンとストアのバックエンド
pub async fn get_version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.store.backend().to_string(),
    })
}
