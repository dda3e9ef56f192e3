//! Industry analysis pipeline
//!
//! Given an industry name, the pipeline asks a completion service for a
//! handful of ticker symbols, then runs a fixed per-ticker sequence of
//! market-data fetches and completion calls to produce a final buy/hold/sell
//! analysis per ticker. Progress is published through a snapshot state store
//! that a presentation layer can poll or subscribe to.
//!
//! # Architecture
//!
//! - [`IndustryAnalyst`] orchestrates a run: ticker generation, then the
//!   sequential per-ticker sub-pipeline (data fetch, sentiment, analyst
//!   ratings, industry analysis, final synthesis, intraday price).
//! - [`StateStore`] holds the run snapshot (stage, ticker statuses, analyses)
//!   and publishes every mutation atomically.
//! - [`PriceCache`] is a process-wide last-observed-price map shared across
//!   runs.
//! - Ranking and company comparison are explicit operations, never invoked
//!   automatically by a run.
//!
//! # Example
//!
//! ```rust,ignore
//! use investor_core::{AnalystConfig, IndustryAnalyst, PriceCache};
//! use investor_llm::AnthropicProvider;
//! use investor_market::{HttpArticleFetcher, YahooMarketData};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analyst = IndustryAnalyst::new(
//!         Arc::new(AnthropicProvider::from_env()?),
//!         Arc::new(YahooMarketData::new()?),
//!         Arc::new(HttpArticleFetcher::new()?),
//!         AnalystConfig::from_env()?,
//!         PriceCache::new(),
//!     );
//!
//!     analyst.run("Cloud Computing").await?;
//!     println!("{:#?}", analyst.state().snapshot());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prices;
pub mod prompts;
pub mod state;

// Re-export main types for convenience
pub use config::AnalystConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{IndustryAnalyst, StockData, NO_RATINGS_AVAILABLE};
pub use prices::PriceCache;
pub use state::{PipelineStage, RunSnapshot, StateStore, TickerEntry, TickerStatus};
