//! Market-data source trait

use crate::types::{Classification, FinancialStatement, NewsItem, Quote, Recommendation};
use crate::Result;
use async_trait::async_trait;
use chrono::Duration;

/// Trait for market-data providers
///
/// One implementation ships ([`crate::YahooMarketData`]); the trait exists so
/// the pipeline can be exercised against mock data in tests.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Daily price history over a trailing window ending now
    async fn fetch_history(&self, ticker: &str, window: Duration) -> Result<Vec<Quote>>;

    /// Most recent balance sheet statements
    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<FinancialStatement>;

    /// Most recent income statements
    async fn fetch_financials(&self, ticker: &str) -> Result<FinancialStatement>;

    /// Recent news items for the ticker
    async fn fetch_news(&self, ticker: &str) -> Result<Vec<NewsItem>>;

    /// Analyst recommendation history, oldest first
    async fn fetch_recommendations(&self, ticker: &str) -> Result<Vec<Recommendation>>;

    /// Industry and sector classification
    async fn fetch_classification(&self, ticker: &str) -> Result<Classification>;

    /// Most recent 1-minute close
    async fn fetch_intraday_price(&self, ticker: &str) -> Result<f64>;
}
