// Endpoint behavior through the router, without binding a socket.

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use clint_core::config::ClintConfig;
use clint_enforce::MockAnalyzer;
use clint_server::{router, AppState};
use flate2::write::GzEncoder;
use flate2::Compression;
use tower::ServiceExt;

use super::common::{mock_linter, REJECTED_CONTRACT, TOKEN_CONTRACT};

fn app() -> (Router, Arc<MockAnalyzer>) {
    let (linter, mock) = mock_linter();
    (router(AppState::new(linter, &ClintConfig::default())), mock)
}

async fn post(app: Router, uri: &str, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn gzip(source: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(source.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[tokio::test]
async fn test_health_reports_analyzer() {
    let (app, _) = app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["analyzer"], "mock");
}

#[tokio::test]
async fn test_base64_clean_contract() {
    let (app, mock) = app();
    let body = BASE64_STANDARD.encode(TOKEN_CONTRACT).into_bytes();
    let (status, value) = post(app, "/lint_base64", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["success"], true);
    assert_eq!(value["violations"].as_array().unwrap().len(), 0);
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn test_gzip_rejected_contract() {
    let (app, _) = app();
    let (status, value) = post(app, "/lint_gzip", gzip(REJECTED_CONTRACT)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["success"], false);
    let messages: Vec<&str> = value["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["message"].as_str().unwrap())
        .collect();
    assert!(messages.iter().any(|m| m.starts_with("S5-")));
    assert!(messages.iter().any(|m| m.starts_with("S19-")));
}

#[tokio::test]
async fn test_both_encodings_agree() {
    let (app_a, _) = app();
    let (app_b, _) = app();
    let (_, via_base64) = post(
        app_a,
        "/lint_base64",
        BASE64_STANDARD.encode(REJECTED_CONTRACT).into_bytes(),
    )
    .await;
    let (_, via_gzip) = post(app_b, "/lint_gzip", gzip(REJECTED_CONTRACT)).await;
    assert_eq!(via_base64, via_gzip);
}

#[tokio::test]
async fn test_module_level_violation_has_no_position() {
    let (app, _) = app();
    let source = "def f():\n    pass\n";
    let (_, value) = post(app, "/lint_base64", BASE64_STANDARD.encode(source).into_bytes()).await;
    let first = &value["violations"][0];
    assert!(first["message"].as_str().unwrap().starts_with("S12-"));
    assert!(first.get("position").is_none());
}

#[tokio::test]
async fn test_query_whitelist_overrides_default() {
    let (app, mock) = app();
    mock.set_output(TOKEN_CONTRACT, "<stdin>:1:12: undefined name 'Hash'\n");
    let body = BASE64_STANDARD.encode(TOKEN_CONTRACT).into_bytes();
    let (_, value) = post(app, "/lint_base64?whitelist=unrelated,other", body).await;
    assert_eq!(value["success"], false);
    assert_eq!(value["violations"][0]["message"], "undefined name 'Hash'");
    assert_eq!(value["violations"][0]["position"]["column"], 11);
}

#[tokio::test]
async fn test_invalid_base64_is_bad_request() {
    let (app, _) = app();
    let (status, value) = post(app, "/lint_base64", b"!!!not base64!!!".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["success"], false);
}

#[tokio::test]
async fn test_invalid_gzip_is_bad_request() {
    let (app, _) = app();
    let (status, value) = post(app, "/lint_gzip", b"plain text".to_vec()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["success"], false);
}
