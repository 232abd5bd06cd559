//! Contract Test: POST /api/checkout

use crate::support::{build_app, get_request, json_request, read_json};
use axum::http::StatusCode;
use equiplog::common::config::StoreBackend;
use serde_json::json;
use tower::ServiceExt;

/// 正常な貸出は200とlogEntryを返す
#[tokio::test]
async fn test_checkout_returns_log_entry() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/checkout",
            json!({
                "equipmentType": "Chromebook",
                "equipmentNumber": "CB-1001",
                "staffApproval": "Mr. Smith"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Equipment checked out successfully");

    let entry = &body["logEntry"];
    assert_eq!(entry["type"], "checkout");
    assert_eq!(entry["equipmentType"], "Chromebook");
    assert_eq!(entry["equipmentNumber"], "CB-1001");
    assert_eq!(entry["staffApproval"], "Mr. Smith");
    assert!(!entry["id"].as_str().unwrap().is_empty());
    assert!(entry["timestamp"].is_string());
}

/// 承認者が空なら400で、何も記録されない
#[tokio::test]
async fn test_checkout_without_approver_is_rejected() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/checkout",
            json!({
                "equipmentType": "Charger",
                "equipmentNumber": "5",
                "staffApproval": "   "
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing required field: staffApproval");

    let response = app.oneshot(get_request("/api/getAllLogs")).await.unwrap();
    let body = read_json(response).await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 0);
}

/// フィールド欠落も400
#[tokio::test]
async fn test_checkout_missing_number_is_rejected() {
    let (app, _dir) = build_app(StoreBackend::Sqlite).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/checkout",
            json!({ "equipmentType": "Charger", "staffApproval": "Ms. Lee" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing required field: equipmentNumber");
}

/// GETは405
#[tokio::test]
async fn test_checkout_wrong_method() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app.oneshot(get_request("/api/checkout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
