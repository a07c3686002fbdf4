//! Liveness probes.

use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /health`: status plus the current UTC time in RFC 3339.
pub async fn health() -> Json<HealthResponse> {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    Json(HealthResponse { status: "OK", timestamp })
}

/// `GET /api/health`
pub async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
