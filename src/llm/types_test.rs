use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_codes_are_stable() {
    let cases: Vec<(LlmError, &str)> = vec![
        (LlmError::ConfigParse("bad".into()), "E_CONFIG_PARSE"),
        (LlmError::MissingApiKey { var: "KEY".into() }, "E_MISSING_API_KEY"),
        (LlmError::ApiRequest("timeout".into()), "E_API_REQUEST"),
        (LlmError::ApiResponse { status: 500, message: "oops".into() }, "E_API_RESPONSE"),
        (LlmError::ApiParse("json".into()), "E_API_PARSE"),
        (LlmError::Blocked("SAFETY".into()), "E_BLOCKED"),
        (LlmError::EmptyResponse, "E_EMPTY_RESPONSE"),
        (LlmError::HttpClientBuild("tls".into()), "E_HTTP_CLIENT_BUILD"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
    }
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_transport_and_server_errors() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, message: "quota".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, message: "unavailable".into() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, message: "bad".into() }.retryable());
    assert!(!LlmError::Blocked("SAFETY".into()).retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
}

#[test]
fn api_response_display_carries_message() {
    let err = LlmError::ApiResponse { status: 403, message: "API key not valid".into() };
    assert_eq!(err.to_string(), "API response error: status 403: API key not valid");
}

// =============================================================================
// Wire shapes
// =============================================================================

#[test]
fn generation_config_serializes_camel_case() {
    let cfg = GenerationConfig { temperature: 0.5, max_output_tokens: 4096 };
    let json = serde_json::to_value(cfg).unwrap();
    assert_eq!(json, serde_json::json!({ "temperature": 0.5, "maxOutputTokens": 4096 }));
}

#[test]
fn part_constructor() {
    assert_eq!(Part::text("hi"), Part { text: "hi".into() });
}
