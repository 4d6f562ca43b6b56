//! Provider error types.
//!
//! Every variant is terminal from the caller's point of view: no retry is
//! attempted, and the dispatcher converts the error into a generic
//! user-facing message while the full detail is logged server-side.

use thiserror::Error;

/// Errors from external provider calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure, including connect errors and timeouts.
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (truncated by the caller before logging if large).
        body: String,
    },

    /// The client was constructed without the credentials it needs.
    #[error("provider not configured: {0}")]
    Unconfigured(&'static str),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ProviderError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "provider returned status 503: unavailable");
    }

    #[test]
    fn unconfigured_display() {
        let err = ProviderError::Unconfigured("missing payment keys");
        assert!(err.to_string().contains("missing payment keys"));
    }
}
