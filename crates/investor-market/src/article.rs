//! Best-effort news-article body fetching
//!
//! Article bodies only feed sentiment prompts, so an unreachable or
//! unparseable article degrades to a fixed placeholder string instead of
//! failing the caller.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Placeholder substituted when an article body cannot be retrieved
pub const ARTICLE_UNAVAILABLE: &str = "Error retrieving article text.";

/// Source of article body text; infallible by contract
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch the article body at `url`, or the placeholder on any failure
    async fn article_text(&self, url: &str) -> String;
}

/// HTTP article fetcher extracting paragraph text from the page
pub struct HttpArticleFetcher {
    client: Client,
    paragraph: Regex,
    tag: Regex,
}

impl HttpArticleFetcher {
    pub fn new() -> Result<Self, crate::MarketError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; investor-rs)")
            .build()?;
        Ok(Self {
            client,
            paragraph: Regex::new(r"(?is)<p[^>]*>(.*?)</p>")
                .map_err(|e| crate::MarketError::ApiError(e.to_string()))?,
            tag: Regex::new(r"<[^>]+>").map_err(|e| crate::MarketError::ApiError(e.to_string()))?,
        })
    }

    fn extract_paragraphs(&self, html: &str) -> Option<String> {
        let joined = self
            .paragraph
            .captures_iter(html)
            .filter_map(|c| c.get(1))
            .map(|m| self.tag.replace_all(m.as_str(), "").trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() { None } else { Some(joined) }
    }
}

#[async_trait]
impl ArticleSource for HttpArticleFetcher {
    async fn article_text(&self, url: &str) -> String {
        let body = match self.client.get(url).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(url, error = %e, "Failed to read article body");
                    return ARTICLE_UNAVAILABLE.to_string();
                }
            },
            Err(e) => {
                debug!(url, error = %e, "Failed to fetch article");
                return ARTICLE_UNAVAILABLE.to_string();
            }
        };

        self.extract_paragraphs(&body)
            .unwrap_or_else(|| ARTICLE_UNAVAILABLE.to_string())
    }
}
