//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! carries only process-wide, immutable configuration: the model client and
//! the host platform name embedded in every preamble. Requests share nothing
//! mutable, so no locking is needed.

use std::sync::Arc;

use crate::llm::TextGenerator;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the client is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn TextGenerator>,
    /// Operating system name reported to the model (e.g. `"linux"`).
    pub platform: &'static str,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm, platform: std::env::consts::OS }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
