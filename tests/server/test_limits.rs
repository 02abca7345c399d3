// Size bounds from the server configuration.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use clint_core::config::ClintConfig;
use clint_server::{router, AppState, Limits};
use tower::ServiceExt;

use super::common::mock_linter;

fn small_config() -> ClintConfig {
    let mut config = ClintConfig::default();
    config.server.max_source_bytes = 64;
    config.server.max_body_bytes = 1024;
    config
}

#[test]
fn test_limits_follow_config() {
    let limits = Limits::from(&small_config().server);
    assert_eq!(limits.max_source_bytes, 64);
    assert_eq!(limits.max_body_bytes, 1024);
    assert_eq!(limits.request_timeout.as_secs(), 30);
}

#[tokio::test]
async fn test_oversized_source_is_rejected() {
    let (linter, mock) = mock_linter();
    let app = router(AppState::new(linter, &small_config()));
    let source = "x = 1\n".repeat(20);
    let req = Request::builder()
        .method("POST")
        .uri("/lint_base64")
        .body(Body::from(BASE64_STANDARD.encode(source)))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let (linter, _) = mock_linter();
    let app = router(AppState::new(linter, &small_config()));
    let req = Request::builder()
        .method("POST")
        .uri("/lint_base64")
        .body(Body::from(vec![b'A'; 4096]))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
