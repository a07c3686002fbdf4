//! Grepable error codes shared by the relay's error types.

/// Stable machine-readable code for an error, logged alongside the
/// human-readable message.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    /// Whether the same request could plausibly succeed if sent again.
    /// Informational only: the relay never retries.
    fn retryable(&self) -> bool {
        false
    }
}
