//! Yahoo Finance news-search client

use crate::error::{MarketError, Result};
use crate::types::NewsItem;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SEARCH_BASE: &str = "https://query1.finance.yahoo.com/v1/finance/search";

/// Client for the news-search endpoint
pub struct NewsClient {
    client: Client,
}

impl NewsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; investor-rs)")
            .build()?;
        Ok(Self { client })
    }

    /// Recent news items for a symbol
    pub async fn company_news(&self, symbol: &str, count: usize) -> Result<Vec<NewsItem>> {
        let url = format!("{SEARCH_BASE}?q={symbol}&quotesCount=0&newsCount={count}");
        debug!(symbol, count, "Fetching news");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::ApiError(format!(
                "news search error {status}: {body}"
            )));
        }

        let result: SearchResult = response.json().await?;
        Ok(result
            .news
            .into_iter()
            .filter_map(|item| {
                let published_at = DateTime::from_timestamp(item.provider_publish_time?, 0)?;
                Some(NewsItem {
                    title: item.title?,
                    publisher: item.publisher.unwrap_or_default(),
                    link: item.link?,
                    published_at,
                })
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    news: Vec<RawNewsItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNewsItem {
    title: Option<String>,
    publisher: Option<String>,
    link: Option<String>,
    provider_publish_time: Option<i64>,
}
