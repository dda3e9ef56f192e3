//! Completion request and response types

use crate::Message;
use serde::{Deserialize, Serialize};

/// One completion call: a model, a message list, an optional system
/// instruction, and sampling bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Conversation messages; this pipeline sends a single user message
    pub messages: Vec<Message>,

    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Request carrying a single message, with default bounds
    pub fn new(model: impl Into<String>, message: Message) -> Self {
        Self {
            model: model.into(),
            messages: vec![message],
            system: None,
            max_tokens: 1024,
            temperature: None,
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the max-token bound
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Append another conversation message
    pub fn push_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// Response from a completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub text: String,

    /// Why generation stopped
    pub stop_reason: StopReason,

    /// Token usage statistics
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// True when the response was cut off at the max-token bound
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::MaxTokens
    }
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion
    EndTurn,

    /// Hit the max-token bound
    MaxTokens,

    /// Stop sequence encountered
    StopSequence,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;

    #[test]
    fn test_request_construction() {
        let request = CompletionRequest::new(
            "claude-3-haiku-20240307",
            Message::user("List some tickers"),
        )
        .with_system("You are a financial analyst assistant")
        .with_max_tokens(200)
        .with_temperature(0.5);

        assert_eq!(request.model, "claude-3-haiku-20240307");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 200);
        assert_eq!(request.temperature, Some(0.5));
    }

    #[test]
    fn test_truncation_flag() {
        let response = CompletionResponse {
            text: "partial".to_string(),
            stop_reason: StopReason::MaxTokens,
            usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 200,
            },
        };
        assert!(response.is_truncated());
        assert_eq!(response.usage.total(), 300);
    }
}
