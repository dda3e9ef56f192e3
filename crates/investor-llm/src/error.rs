//! Error types for completion-service operations

use thiserror::Error;

/// Result type alias for completion-service operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors raised while talking to a completion service
#[derive(Debug, Error)]
pub enum LlmError {
    /// The service rejected or failed the request
    #[error("API error: {0}")]
    ApiError(String),

    /// Missing or invalid API key
    #[error("Authentication failed; check the API key")]
    AuthenticationFailed,

    /// The service throttled the request
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The request was malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested model does not exist
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LlmError::UnknownModel("claude-nonexistent".to_string());
        assert_eq!(err.to_string(), "Unknown model: claude-nonexistent");

        let err = LlmError::RateLimited("retry later".to_string());
        assert!(err.to_string().contains("retry later"));
    }
}
