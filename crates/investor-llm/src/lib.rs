//! Completion-service abstraction for the investor pipeline
//!
//! This crate provides provider-agnostic types for text-completion calls:
//!
//! - Message types for prompt construction
//! - Completion request/response types
//! - Provider trait for completion-service implementations
//! - Anthropic Messages API implementation

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LlmProvider;
pub use providers::AnthropicProvider;
