//! Contract Test: GET /api/version

use crate::support::{build_app, get_request, read_json};
use axum::http::StatusCode;
use equiplog::common::config::StoreBackend;
use tower::ServiceExt;

/// バージョンとバックエンド名を返す
#[tokio::test]
async fn test_version_api_matches_cargo_version() {
    let (app, _dir) = build_app(StoreBackend::Sqlite).await;

    let response = app.oneshot(get_request("/api/version")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["version"].as_str().unwrap(), env!("CARGO_PKG_VERSION"));
    assert_eq!(body["backend"], "sqlite");
}
