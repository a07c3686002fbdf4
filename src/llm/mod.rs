//! LLM: adapter for the external text-generation model.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables (see [`config`]). The
//! relay only needs single-shot text generation, so the provider surface is
//! the [`TextGenerator`] trait; `LlmClient` is its Gemini-backed
//! implementation and tests substitute mocks.

pub mod config;
pub mod gemini;
pub mod types;

use config::LlmConfig;
pub use types::TextGenerator;
use types::{Generation, GenerationConfig, LlmError, Part};

// =============================================================================
// CLIENT
// =============================================================================

/// Gemini client bound to one model name.
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Any [`LlmConfig::from_env`] error, or a client build failure.
    pub fn from_env() -> Result<Self, LlmError> {
        LlmConfig::from_env().and_then(Self::from_config)
    }

    /// # Errors
    ///
    /// [`LlmError::HttpClientBuild`] if the TLS backend cannot initialize.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }
}

#[async_trait::async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, parts: &[Part], config: GenerationConfig) -> Result<Generation, LlmError> {
        self.inner.generate(&self.model, parts, config).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
