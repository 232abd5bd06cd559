//! Contract Test: POST /api/return

use crate::support::{build_app, json_request, read_json};
use axum::http::StatusCode;
use equiplog::common::config::StoreBackend;
use serde_json::json;
use tower::ServiceExt;

/// 返却レコードには承認者フィールドが含まれない
#[tokio::test]
async fn test_return_has_no_approver() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/return",
            json!({ "equipmentType": "Headphones", "equipmentNumber": "H-12" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Equipment returned successfully");

    let entry = body["logEntry"].as_object().unwrap();
    assert_eq!(entry["type"], "return");
    assert_eq!(entry["equipmentNumber"], "H-12");
    assert!(!entry.contains_key("staffApproval"));
}

/// 承認者を送っても返却では無視される
#[tokio::test]
async fn test_return_ignores_approver() {
    let (app, _dir) = build_app(StoreBackend::Sqlite).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/return",
            json!({
                "equipmentType": "Charger",
                "equipmentNumber": "7",
                "staffApproval": "Mr. Smith"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(body["logEntry"].get("staffApproval").is_none());
}

/// 番号が空なら400
#[tokio::test]
async fn test_return_empty_number_is_rejected() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/return",
            json!({ "equipmentType": "Charger", "equipmentNumber": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing required field: equipmentNumber");
}
