//! Contract Test: GET /api/getAllLogs

use crate::support::{build_app, get_request, json_request, read_json};
use axum::{http::StatusCode, Router};
use equiplog::common::config::StoreBackend;
use serde_json::json;
use tower::ServiceExt;

async fn checkout(app: &Router, number: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/checkout",
            json!({
                "equipmentType": "Chromebook",
                "equipmentNumber": number,
                "staffApproval": "Mr. Smith"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

async fn give_back(app: &Router, number: &str) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/return",
            json!({ "equipmentType": "Chromebook", "equipmentNumber": number }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

/// 空のストアは空配列
#[tokio::test]
async fn test_get_all_logs_empty() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app.oneshot(get_request("/api/getAllLogs")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({ "logs": [] }));
}

/// 新しい順に並ぶ
#[tokio::test]
async fn test_get_all_logs_newest_first() {
    for backend in [StoreBackend::File, StoreBackend::Sqlite] {
        let (app, _dir) = build_app(backend).await;

        checkout(&app, "CB-1001").await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        give_back(&app, "CB-1001").await;

        let response = app.oneshot(get_request("/api/getAllLogs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let logs = body["logs"].as_array().unwrap();
        assert_eq!(logs.len(), 2, "backend {}", backend);
        assert_eq!(logs[0]["type"], "return");
        assert_eq!(logs[1]["type"], "checkout");
        assert_eq!(logs[1]["staffApproval"], "Mr. Smith");
    }
}

/// 壊れたユニットがあっても他のレコードは返る
#[tokio::test]
async fn test_get_all_logs_skips_corrupted_unit() {
    let (app, dir) = build_app(StoreBackend::File).await;

    checkout(&app, "CB-2002").await;
    std::fs::write(
        dir.path().join("data").join("logs").join("checkout_1_broken.json"),
        b"{ not json",
    )
    .unwrap();

    let response = app.oneshot(get_request("/api/getAllLogs")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["equipmentNumber"], "CB-2002");
}
