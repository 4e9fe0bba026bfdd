#![allow(clippy::unwrap_used, clippy::panic, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use leadrelay_server::config::WhatsAppConfig;
use reqwest::StatusCode;
mod common;

#[tokio::test]
async fn test_livez() {
    let app = common::TestApp::spawn("http://127.0.0.1:9").await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_with_credentials() {
    let app = common::TestApp::spawn("http://127.0.0.1:9").await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["whatsapp"], "ok");
}

#[tokio::test]
async fn test_readyz_without_credentials() {
    let mut config = common::get_test_config("http://127.0.0.1:9");
    config.whatsapp = WhatsAppConfig::default();

    let app = common::TestApp::spawn_with_config(config).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["whatsapp"], "error");
}
