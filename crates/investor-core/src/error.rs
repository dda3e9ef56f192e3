//! Error types for the analysis pipeline

use investor_llm::LlmError;
use investor_market::MarketError;
use thiserror::Error;

/// Errors raised by the analysis pipeline
///
/// `Generation` is run-fatal: no ticker work starts after it. `DataFetch` and
/// `Completion` are ticker-fatal: the affected ticker is marked failed and the
/// run continues with the next one.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Ticker-idea generation failed or returned an unparseable list
    #[error("Ticker generation failed: {0}")]
    Generation(String),

    /// Market data unavailable for a ticker
    #[error("Market data unavailable for {symbol}: {source}")]
    DataFetch {
        symbol: String,
        #[source]
        source: MarketError,
    },

    /// A completion call failed or returned unusable content
    #[error("Completion failed for {subject} during {step}: {source}")]
    Completion {
        subject: String,
        step: &'static str,
        #[source]
        source: LlmError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    pub(crate) fn data_fetch(symbol: &str, source: MarketError) -> Self {
        Self::DataFetch {
            symbol: symbol.to_string(),
            source,
        }
    }

    pub(crate) fn completion(subject: &str, step: &'static str, source: LlmError) -> Self {
        Self::Completion {
            subject: subject.to_string(),
            step,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::Generation("response was not a JSON array".to_string());
        assert_eq!(
            err.to_string(),
            "Ticker generation failed: response was not a JSON array"
        );

        let err = PipelineError::data_fetch(
            "XYZ",
            MarketError::DataUnavailable {
                symbol: "XYZ".to_string(),
                reason: "no history".to_string(),
            },
        );
        assert!(err.to_string().contains("XYZ"));
    }
}
