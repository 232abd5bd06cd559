//! Contract Test: POST /api/logs

use crate::support::{build_app, json_request, read_bytes, read_json, TEST_PASSWORD};
use axum::http::{header, StatusCode};
use equiplog::common::config::StoreBackend;
use serde_json::{json, Value};
use std::io::{Cursor, Read};
use tower::ServiceExt;

/// パスワード不一致は401でアーカイブを返さない
#[tokio::test]
async fn test_export_wrong_password_is_unauthorized() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs",
            json!({ "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid password");
}

/// パスワード欠落も401
#[tokio::test]
async fn test_export_missing_password_is_unauthorized() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    let response = app
        .oneshot(json_request("POST", "/api/logs", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// レコードがなければメッセージを返す
#[tokio::test]
async fn test_export_empty_store() {
    let (app, _dir) = build_app(StoreBackend::Sqlite).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs",
            json!({ "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({ "message": "No logs available yet" }));
}

/// 正しいパスワードでzipがダウンロードされ、レコードごとに1エントリ入る
#[tokio::test]
async fn test_export_returns_zip_archive() {
    let (app, _dir) = build_app(StoreBackend::File).await;

    for number in ["1", "2"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/checkout",
                json!({
                    "equipmentType": "Charger",
                    "equipmentNumber": number,
                    "staffApproval": "Ms. Lee"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs",
            json!({ "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=equipment_logs.zip"
    );

    let bytes = read_bytes(response).await;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut numbers = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        assert!(entry.name().starts_with("checkout_"));
        assert!(entry.name().ends_with(".json"));
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        let record: Value = serde_json::from_str(&content).unwrap();
        numbers.push(record["equipmentNumber"].as_str().unwrap().to_string());
    }
    numbers.sort();
    assert_eq!(numbers, vec!["1", "2"]);
}

/// 73バイト以上のパスワードは先頭が一致していても401
#[tokio::test]
async fn test_export_overlong_password_is_unauthorized() {
    let (app, _dir) = build_app(StoreBackend::File).await;
    let overlong = format!("{}{}", TEST_PASSWORD, "!".repeat(80));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/logs",
            json!({ "password": overlong }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
