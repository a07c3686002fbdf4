//! Generation endpoint.
//!
//! Translates between the JSON wire shape and [`services::relay`]. Body
//! rejections are mapped onto the relay's client errors so every failure
//! leaves as a JSON object with an `error` field. The body must be a JSON
//! object; a missing or non-string `prompt` counts as no prompt.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::services;
use crate::services::relay::RelayError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// `POST /api/generate`: `{ "prompt": "..." }` → `{ "text": "..." }`.
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, RelayError> {
    let Json(Value::Object(body)) = body.map_err(rejection_to_error)? else {
        return Err(RelayError::InvalidJson);
    };
    let prompt = body.get("prompt").and_then(Value::as_str).unwrap_or_default();
    let text = services::relay::relay_prompt(state.llm.as_ref(), state.platform, prompt).await?;
    Ok(Json(GenerateResponse { text }))
}

fn rejection_to_error(rejection: JsonRejection) -> RelayError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => RelayError::PromptRequired,
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => RelayError::PayloadTooLarge,
        _ => RelayError::InvalidJson,
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PromptRequired | Self::InvalidJson => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": self.to_string() }))
            }
            Self::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, serde_json::json!({ "error": self.to_string() })),
            Self::Upstream(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "Server error", "details": e.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
