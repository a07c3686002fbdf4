use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use super::*;
use crate::llm::types::LlmError;
use crate::state::test_helpers::{MockGenerator, test_app_state};

async fn send(mock: &Arc<MockGenerator>, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = app(test_app_state(mock.clone())).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, headers, json)
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

// =============================================================================
// POST /api/generate
// =============================================================================

#[tokio::test]
async fn generate_returns_model_text() {
    let mock = Arc::new(MockGenerator::replying("```html\n<h1>Hi</h1>\n```"));
    let (status, _, json) = send(&mock, post_json(r#"{"prompt":"a landing page"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "```html\n<h1>Hi</h1>\n```");
    assert_eq!(mock.call_count(), 1);
    let calls = mock.calls.lock().unwrap();
    assert!(calls[0].0[0].text.contains("Operating System: testos"));
}

#[tokio::test]
async fn generate_rejects_missing_and_blank_prompt() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    for body in [
        r"{}",
        r#"{"prompt":""}"#,
        r#"{"prompt":"   "}"#,
        r#"{"prompt":null}"#,
        r#"{"prompt":42}"#,
        r#"{"prompt":["a landing page"]}"#,
    ] {
        let (status, _, json) = send(&mock, post_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, serde_json::json!({ "error": "Prompt required" }));
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn generate_without_json_content_type_is_prompt_required() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    let request = Request::post("/api/generate").body(Body::from("prompt=hi")).unwrap();
    let (status, _, json) = send(&mock, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Prompt required");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn generate_rejects_malformed_json() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    for body in [r#"{"prompt": "#, "not json"] {
        let (status, _, json) = send(&mock, post_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, serde_json::json!({ "error": "Invalid JSON" }));
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn generate_rejects_non_object_bodies() {
    let mock = Arc::new(MockGenerator::replying("model text"));
    for body in [r#"["build me a site"]"#, r#""build me a site""#, "null", "42"] {
        let (status, _, json) = send(&mock, post_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json, serde_json::json!({ "error": "Invalid JSON" }), "body {body}");
    }
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn generate_rejects_oversized_body() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    let prompt = "x".repeat(BODY_LIMIT_BYTES + 1);
    let body = serde_json::json!({ "prompt": prompt }).to_string();
    let (status, _, json) = send(&mock, post_json(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "Payload too large");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn generate_upstream_failure_is_server_error_with_details() {
    let mock = Arc::new(MockGenerator::failing(LlmError::ApiResponse {
        status: 403,
        message: "API key not valid".into(),
    }));
    let (status, _, json) = send(&mock, post_json(r#"{"prompt":"site"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Server error");
    assert_eq!(json["details"], "API response error: status 403: API key not valid");
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn health_reports_ok_with_rfc3339_timestamp() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    let (status, _, json) = send(&mock, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(time::OffsetDateTime::parse(timestamp, &time::format_description::well_known::Rfc3339).is_ok());
}

#[tokio::test]
async fn api_health_reports_ok_true() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    let (status, _, json) = send(&mock, Request::get("/api/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "ok": true }));
}

// =============================================================================
// HEADERS
// =============================================================================

#[tokio::test]
async fn security_headers_on_every_response() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    for path in ["/health", "/api/health", "/missing"] {
        let (_, headers, _) = send(&mock, Request::get(path).body(Body::empty()).unwrap()).await;
        assert_eq!(headers["x-content-type-options"], "nosniff", "path {path}");
        assert_eq!(headers["x-frame-options"], "DENY", "path {path}");
        assert_eq!(headers["x-xss-protection"], "1; mode=block", "path {path}");
    }
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let mock = Arc::new(MockGenerator::replying("unused"));
    let request = Request::get("/api/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&mock, request).await;
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
