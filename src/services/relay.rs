//! Relay service: user prompt → preamble + prompt → model text.
//!
//! DESIGN
//! ======
//! Stateless and at-most-once: each call validates the prompt, builds the
//! fixed preamble, makes exactly one model request and returns its text
//! unmodified. No retries, no rate limiting. Blank prompts are rejected
//! before any outbound call.

use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::llm::TextGenerator;
use crate::llm::types::{GenerationConfig, LlmError, Part};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 4096;

const GENERATION_CONFIG: GenerationConfig =
    GenerationConfig { temperature: TEMPERATURE, max_output_tokens: MAX_OUTPUT_TOKENS };

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Prompt required")]
    PromptRequired,
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("{0}")]
    Upstream(#[from] LlmError),
}

impl ErrorCode for RelayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::PromptRequired => "E_PROMPT_REQUIRED",
            Self::InvalidJson => "E_INVALID_JSON",
            Self::PayloadTooLarge => "E_PAYLOAD_TOO_LARGE",
            Self::Upstream(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Upstream(e) if e.retryable())
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Forward `prompt` to the model and return its raw text output.
///
/// # Errors
///
/// [`RelayError::PromptRequired`] for a blank prompt (no model call is
/// made); [`RelayError::Upstream`] for any model failure.
pub async fn relay_prompt(llm: &dyn TextGenerator, platform: &str, prompt: &str) -> Result<String, RelayError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(RelayError::PromptRequired);
    }

    info!(model = llm.model(), prompt_len = prompt.len(), "relay: prompt received");

    let parts = [Part::text(build_system_prompt(platform, prompt)), Part::text(prompt)];
    let generation = llm.generate(&parts, GENERATION_CONFIG).await.map_err(|e| {
        warn!(code = e.error_code(), retryable = e.retryable(), error = %e, "relay: model call failed");
        RelayError::Upstream(e)
    })?;

    info!(
        model = %generation.model,
        finish_reason = generation.finish_reason.as_deref().unwrap_or("unknown"),
        input_tokens = generation.input_tokens,
        output_tokens = generation.output_tokens,
        text_len = generation.text.len(),
        "relay: model responded"
    );

    Ok(generation.text)
}

// =============================================================================
// PREAMBLE
// =============================================================================

/// Instructional preamble sent ahead of the user's prompt.
#[must_use]
pub fn build_system_prompt(platform: &str, prompt: &str) -> String {
    format!(
        "You are an expert AI assistant specializing in web development and programming. \
Operating System: {platform}

Key Principles:
1. Provide clear, structured responses
2. Break down complex problems into manageable steps
3. Include code examples when relevant
4. Explain technical concepts in an accessible way
5. Focus on modern best practices and standards
6. Always consider security, performance, and accessibility

When providing code:
- Use modern syntax and patterns
- Include helpful comments
- Follow industry best practices
- Consider cross-browser compatibility
- Implement error handling
- Focus on clean, maintainable code

For web development:
- Recommend responsive design patterns
- Suggest semantic HTML structure
- Promote accessibility best practices
- Consider performance optimization
- Include security considerations

Current request: {prompt}

Please provide a detailed, well-structured response that addresses all aspects of the request."
    )
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
