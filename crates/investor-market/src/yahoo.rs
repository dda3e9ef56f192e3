//! Yahoo Finance implementation of the market-data source

use crate::error::{MarketError, Result};
use crate::news::NewsClient;
use crate::quote_summary::QuoteSummaryClient;
use crate::source::MarketDataSource;
use crate::types::{Classification, FinancialStatement, NewsItem, Quote, Recommendation};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

const DEFAULT_NEWS_COUNT: usize = 8;

/// Market-data source backed by Yahoo Finance
pub struct YahooMarketData {
    summary: QuoteSummaryClient,
    news: NewsClient,
    news_count: usize,
}

impl YahooMarketData {
    /// Create a new Yahoo Finance market-data source
    pub fn new() -> Result<Self> {
        Ok(Self {
            summary: QuoteSummaryClient::new()?,
            news: NewsClient::new()?,
            news_count: DEFAULT_NEWS_COUNT,
        })
    }

    /// Override how many news items to fetch per ticker
    pub fn with_news_count(mut self, count: usize) -> Self {
        self.news_count = count;
        self
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| MarketError::YahooFinanceError(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for YahooMarketData {
    async fn fetch_history(&self, ticker: &str, window: Duration) -> Result<Vec<Quote>> {
        let provider = Self::connector()?;

        let end = Utc::now();
        let start = end - window;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(ticker, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| Quote {
                symbol: ticker.to_string(),
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
            })
            .collect())
    }

    async fn fetch_balance_sheet(&self, ticker: &str) -> Result<FinancialStatement> {
        self.summary.balance_sheet(ticker).await
    }

    async fn fetch_financials(&self, ticker: &str) -> Result<FinancialStatement> {
        self.summary.income_statements(ticker).await
    }

    async fn fetch_news(&self, ticker: &str) -> Result<Vec<NewsItem>> {
        self.news.company_news(ticker, self.news_count).await
    }

    async fn fetch_recommendations(&self, ticker: &str) -> Result<Vec<Recommendation>> {
        self.summary.recommendations(ticker).await
    }

    async fn fetch_classification(&self, ticker: &str) -> Result<Classification> {
        self.summary.classification(ticker).await
    }

    async fn fetch_intraday_price(&self, ticker: &str) -> Result<f64> {
        let provider = Self::connector()?;

        let response = provider
            .get_latest_quotes(ticker, "1m")
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(quote.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_history() {
        let source = YahooMarketData::new().unwrap();
        let quotes = source
            .fetch_history("AAPL", Duration::days(30))
            .await
            .unwrap();

        assert!(!quotes.is_empty());
        assert_eq!(quotes[0].symbol, "AAPL");
        assert!(quotes[0].close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_intraday_price() {
        let source = YahooMarketData::new().unwrap();
        let price = source.fetch_intraday_price("AAPL").await.unwrap();
        assert!(price > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_classification() {
        let source = YahooMarketData::new().unwrap();
        let classification = source.fetch_classification("AAPL").await.unwrap();
        assert!(!classification.industry.is_empty());
        assert!(!classification.sector.is_empty());
    }
}
