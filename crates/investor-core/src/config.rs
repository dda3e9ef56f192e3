//! Configuration for the analysis pipeline

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Default lower-cost model for ticker generation, sentiment and industry analysis
const DEFAULT_ANALYSIS_MODEL: &str = "claude-3-haiku-20240307";
/// Default higher-capability model for final analysis, ranking and comparison
const DEFAULT_SYNTHESIS_MODEL: &str = "claude-3-opus-20240229";

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystConfig {
    /// How many ticker ideas to request per run
    pub max_tickers: usize,

    /// Trailing price-history window in days
    pub history_window_days: i64,

    /// Model for ticker generation, sentiment and industry analysis
    pub analysis_model: String,

    /// Model for final analysis, ranking and comparison
    pub synthesis_model: String,

    /// Sampling temperature for every completion call
    pub temperature: f32,

    /// Max tokens for the ticker-generation call
    pub generation_max_tokens: usize,

    /// Max tokens for sentiment and industry-analysis calls
    pub analysis_max_tokens: usize,

    /// Max tokens for final-analysis, ranking and comparison calls
    pub synthesis_max_tokens: usize,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            max_tickers: 4,
            history_window_days: 365,
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            synthesis_model: DEFAULT_SYNTHESIS_MODEL.to_string(),
            temperature: 0.5,
            generation_max_tokens: 200,
            analysis_max_tokens: 2000,
            synthesis_max_tokens: 3000,
        }
    }
}

impl AnalystConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalystConfigBuilder {
        AnalystConfigBuilder::default()
    }

    /// Build a configuration from the environment
    ///
    /// Reads `MAX_TICKERS_TO_ANALYZE` when set; everything else keeps its
    /// default.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("MAX_TICKERS_TO_ANALYZE") {
            config.max_tickers = raw.parse().map_err(|_| {
                PipelineError::Config(format!(
                    "MAX_TICKERS_TO_ANALYZE must be a positive integer, got {raw:?}"
                ))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_tickers == 0 {
            return Err(PipelineError::Config(
                "max_tickers must be greater than 0".to_string(),
            ));
        }
        if self.history_window_days <= 0 {
            return Err(PipelineError::Config(
                "history_window_days must be greater than 0".to_string(),
            ));
        }
        if self.analysis_model.is_empty() || self.synthesis_model.is_empty() {
            return Err(PipelineError::Config(
                "model identifiers must not be empty".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(PipelineError::Config(
                "temperature must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AnalystConfig
#[derive(Debug, Default)]
pub struct AnalystConfigBuilder {
    max_tickers: Option<usize>,
    history_window_days: Option<i64>,
    analysis_model: Option<String>,
    synthesis_model: Option<String>,
    temperature: Option<f32>,
}

impl AnalystConfigBuilder {
    /// Set how many ticker ideas to request per run
    pub fn max_tickers(mut self, count: usize) -> Self {
        self.max_tickers = Some(count);
        self
    }

    /// Set the trailing price-history window in days
    pub fn history_window_days(mut self, days: i64) -> Self {
        self.history_window_days = Some(days);
        self
    }

    /// Set the lower-cost analysis model
    pub fn analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = Some(model.into());
        self
    }

    /// Set the higher-capability synthesis model
    pub fn synthesis_model(mut self, model: impl Into<String>) -> Self {
        self.synthesis_model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalystConfig> {
        let defaults = AnalystConfig::default();

        let config = AnalystConfig {
            max_tickers: self.max_tickers.unwrap_or(defaults.max_tickers),
            history_window_days: self
                .history_window_days
                .unwrap_or(defaults.history_window_days),
            analysis_model: self.analysis_model.unwrap_or(defaults.analysis_model),
            synthesis_model: self.synthesis_model.unwrap_or(defaults.synthesis_model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            generation_max_tokens: defaults.generation_max_tokens,
            analysis_max_tokens: defaults.analysis_max_tokens,
            synthesis_max_tokens: defaults.synthesis_max_tokens,
        };

        config.validate()?;
        Ok(config)
    }
}
