//! Concrete completion-service provider implementations

mod anthropic;

pub use anthropic::AnthropicProvider;
