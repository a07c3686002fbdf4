//! LLM types: provider-neutral request parts, results and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Failure modes of a Gemini generation call and of client setup.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// An environment value had the wrong shape.
    #[error("invalid model config: {0}")]
    ConfigParse(String),

    #[error("{var} is not set")]
    MissingApiKey { var: String },

    /// Transport-level failure: DNS, connect, timeout, truncated body.
    #[error("model request failed: {0}")]
    ApiRequest(String),

    #[error("API response error: status {status}: {message}")]
    ApiResponse { status: u16, message: String },

    /// A 200 body that is not a `generateContent` response.
    #[error("unreadable model response: {0}")]
    ApiParse(String),

    /// Safety or recitation filtering withheld the output.
    #[error("response blocked: {0}")]
    Blocked(String),

    #[error("response contained no text")]
    EmptyResponse,

    #[error("could not build HTTP client: {0}")]
    HttpClientBuild(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::Blocked(_) => "E_BLOCKED",
            Self::EmptyResponse => "E_EMPTY_RESPONSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Transport failures, rate limiting and 5xx answers.
    fn retryable(&self) -> bool {
        match self {
            Self::ApiRequest(_) => true,
            Self::ApiResponse { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// One text segment of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Text produced by one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// TEXT GENERATOR TRAIT
// =============================================================================

/// Provider-neutral async trait for single-shot text generation. Enables
/// mocking in tests.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the parts as one user turn and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is
    /// malformed or blocked, or the provider rejects the call.
    async fn generate(&self, parts: &[Part], config: GenerationConfig) -> Result<Generation, LlmError>;

    /// Model name requests are sent to.
    fn model(&self) -> &str;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
