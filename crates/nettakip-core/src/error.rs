//! Boundary error types.
//!
//! Defined in `nettakip-core` so callers can classify failures from the
//! record store and the coach model without string matching. Per the error
//! policy, nothing is retried automatically: classification only decides how
//! a failure is surfaced.

use thiserror::Error;

/// Errors from the remote record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API rejected the key (401/403).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Any other non-success response.
    #[error("store error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the expected rows.
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Returns `true` for failures that no amount of waiting will fix.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            StoreError::AuthenticationFailed(_) | StoreError::Decode(_)
        )
    }
}

/// Errors from the AI coach model.
///
/// The coach surface converts all of these into a fixed fallback string; the
/// variants exist so the failure can be logged with its cause.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("model error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    /// The response decoded but contained no candidate text.
    #[error("model returned no text")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanence_classification() {
        assert!(StoreError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(StoreError::Decode("not json".into()).is_permanent());
        assert!(!StoreError::Timeout(30).is_permanent());
        assert!(!StoreError::RateLimited { retry_after_ms: 500 }.is_permanent());
    }

    #[test]
    fn error_messages() {
        let err = StoreError::ApiError {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.to_string().contains("503"));
        assert_eq!(CoachError::EmptyResponse.to_string(), "model returned no text");
    }
}
