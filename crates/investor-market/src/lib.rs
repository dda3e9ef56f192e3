//! Market-data abstraction for the investor pipeline
//!
//! This crate wraps the external market-data provider behind the
//! [`MarketDataSource`] trait: price history, balance sheet, financial
//! statements, news, analyst recommendations, industry/sector classification,
//! and the latest intraday price. The shipped implementation talks to Yahoo
//! Finance (the `yahoo_finance_api` crate for quotes, hand-rolled clients for
//! the quoteSummary and news-search endpoints).
//!
//! News article bodies are fetched best-effort through [`ArticleSource`]; an
//! unreachable article yields a fixed placeholder string, never an error.

pub mod article;
pub mod error;
pub mod news;
pub mod quote_summary;
pub mod source;
pub mod types;
pub mod yahoo;

pub use article::{ARTICLE_UNAVAILABLE, ArticleSource, HttpArticleFetcher};
pub use error::{MarketError, Result};
pub use source::MarketDataSource;
pub use types::{
    Classification, FinancialStatement, NewsItem, Quote, Recommendation, StatementRow,
};
pub use yahoo::YahooMarketData;
