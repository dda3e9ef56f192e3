//! Error types for market-data operations

use thiserror::Error;

/// Result type alias for market-data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors raised while fetching market data
#[derive(Debug, Error)]
pub enum MarketError {
    /// The endpoint answered with a non-success status or unusable payload
    #[error("Market API error: {0}")]
    ApiError(String),

    /// The provider does not recognize the ticker symbol
    #[error("Invalid ticker symbol: {0}")]
    InvalidSymbol(String),

    /// The provider recognizes the symbol but has nothing to return
    #[error("{symbol} has no usable data: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP failure
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error surfaced by the quote-history client
    #[error("Quote API error: {0}")]
    YahooFinanceError(String),
}
