//! 貸出 → 返却 → 一覧 → エクスポートを実際のHTTPで通す

use crate::support::{build_app, http::spawn_server, TEST_PASSWORD};
use equiplog::common::config::StoreBackend;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_checkout_return_export_flow() {
    let (app, _dir) = build_app(StoreBackend::File).await;
    let server = spawn_server(app).await;
    let base = server.base_url();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/checkout", base))
        .json(&json!({
            "equipmentType": "Chromebook",
            "equipmentNumber": "CB-1001",
            "staffApproval": "Mr. Smith"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = client
        .post(format!("{}/api/return", base))
        .json(&json!({ "equipmentType": "Chromebook", "equipmentNumber": "CB-1001" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{}/api/getAllLogs", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["type"], "return");
    assert_eq!(logs[1]["type"], "checkout");

    let response = client
        .post(format!("{}/api/logs", base))
        .json(&json!({ "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .post(format!("{}/api/logs", base))
        .json(&json!({ "password": TEST_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let length = response.content_length();
    let bytes = response.bytes().await.unwrap();
    assert_eq!(length, Some(bytes.len() as u64));

    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).unwrap();
    assert_eq!(archive.len(), 2);

    server.stop().await;
}
