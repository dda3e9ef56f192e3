//! The industry analysis pipeline
//!
//! One run: generate ticker ideas for an industry, then for each ticker in
//! generation order run the fixed sub-pipeline (market data, sentiment,
//! analyst ratings, industry analysis, final synthesis, intraday price).
//! Tickers are processed strictly sequentially; a ticker failure is recorded
//! and the run continues. Ranking and company comparison are explicit
//! operations a caller invokes separately.

use crate::config::AnalystConfig;
use crate::error::{PipelineError, Result};
use crate::prices::PriceCache;
use crate::prompts::{system, user};
use crate::state::{PipelineStage, StateStore};
use chrono::Duration;
use investor_llm::{CompletionRequest, LlmProvider, Message};
use investor_market::{
    ArticleSource, FinancialStatement, MarketDataSource, NewsItem, Quote, Recommendation,
    types::history_tail_text,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fixed summary when a ticker has no recommendation records
pub const NO_RATINGS_AVAILABLE: &str = "No analyst ratings available.";

/// How many recent history bars to embed into prompts
const HISTORY_TAIL_ROWS: usize = 5;

/// All market data fetched for one ticker
#[derive(Debug, Clone)]
pub struct StockData {
    pub history: Vec<Quote>,
    pub balance_sheet: FinancialStatement,
    pub financials: FinancialStatement,
    pub news: Vec<NewsItem>,
}

/// Orchestrates industry analysis runs
pub struct IndustryAnalyst {
    llm: Arc<dyn LlmProvider>,
    market: Arc<dyn MarketDataSource>,
    articles: Arc<dyn ArticleSource>,
    config: AnalystConfig,
    state: StateStore,
    prices: PriceCache,
}

impl IndustryAnalyst {
    /// Create a new analyst over the given collaborators
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        market: Arc<dyn MarketDataSource>,
        articles: Arc<dyn ArticleSource>,
        config: AnalystConfig,
        prices: PriceCache,
    ) -> Self {
        Self {
            llm,
            market,
            articles,
            config,
            state: StateStore::new(),
            prices,
        }
    }

    /// The run-state store readers subscribe to
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// The shared price cache
    pub fn prices(&self) -> &PriceCache {
        &self.prices
    }

    /// Execute one run for an industry
    ///
    /// Ticker generation failure aborts the run before any ticker work and
    /// surfaces as stage `Failed`. Per-ticker failures are recorded on the
    /// affected ticker only; the run always reaches stage `Ranking` once
    /// ticker work has started.
    #[instrument(skip(self))]
    pub async fn run(&self, industry: &str) -> Result<()> {
        let industry = industry.trim();
        if industry.is_empty() {
            let err = PipelineError::Generation("industry must not be empty".to_string());
            self.state.fail_run(industry, err.to_string());
            return Err(err);
        }

        let tickers = match self.generate_tickers(industry).await {
            Ok(tickers) => tickers,
            Err(err) => {
                warn!(industry, error = %err, "Ticker generation failed");
                self.state.fail_run(industry, err.to_string());
                return Err(err);
            }
        };

        info!(industry, ?tickers, "Starting analysis run");
        self.state.begin_run(industry, tickers.clone());

        for ticker in &tickers {
            // Publish the transition before any external call for the ticker
            self.state.mark_processing(ticker);
            info!(ticker, "Analyzing");

            match self.analyze(ticker).await {
                Ok(analysis) => {
                    self.state.mark_finished(ticker, analysis);
                }
                Err(err) => {
                    warn!(ticker, error = %err, "Ticker analysis failed");
                    self.state.mark_failed(ticker);
                }
            }
        }

        self.state.set_stage(PipelineStage::Ranking);
        Ok(())
    }

    /// Ask the completion service for ticker ideas and parse them
    async fn generate_tickers(&self, industry: &str) -> Result<Vec<String>> {
        let count = self.config.max_tickers;
        let text = self
            .complete(
                &self.config.analysis_model,
                system::ticker_ideas(count, industry),
                user::ticker_ideas(count, industry),
                self.config.generation_max_tokens,
            )
            .await
            .map_err(|e| PipelineError::Generation(e.to_string()))?;

        parse_ticker_list(&text)
    }

    /// Run the full sub-pipeline for one ticker
    #[instrument(skip(self))]
    pub async fn analyze(&self, ticker: &str) -> Result<String> {
        let data = self.fetch_stock_data(ticker).await?;

        let sentiment = self.sentiment_analysis(ticker, &data.news).await?;

        // Analyst ratings come straight from the data; fetch failures degrade
        // to the fixed no-ratings message.
        let ratings = match self.market.fetch_recommendations(ticker).await {
            Ok(records) => rating_summary(ticker, &records),
            Err(err) => {
                warn!(ticker, error = %err, "Recommendation fetch failed");
                NO_RATINGS_AVAILABLE.to_string()
            }
        };

        let industry_analysis = self.industry_analysis(ticker).await?;

        let final_analysis = self
            .final_analysis(ticker, None, &sentiment, &ratings, &industry_analysis)
            .await?;

        // Best-effort price recording; never aborts the sub-pipeline.
        match self.market.fetch_intraday_price(ticker).await {
            Ok(price) => self.prices.insert(ticker, price),
            Err(err) => warn!(ticker, error = %err, "Intraday price fetch failed"),
        }

        Ok(final_analysis)
    }

    /// Rank analyzed companies from most to least attractive
    ///
    /// Explicit operation: a caller invokes this once a run has reached stage
    /// `Ranking`, passing the finished analyses (in ticker order) and the
    /// last-known prices.
    pub async fn rank(
        &self,
        industry: &str,
        analyses: &[(String, String)],
        prices: &HashMap<String, f64>,
    ) -> Result<String> {
        let analysis_text = analyses
            .iter()
            .map(|(ticker, analysis)| {
                let price = prices
                    .get(ticker)
                    .map_or_else(|| "N/A".to_string(), |p| format!("{p:.2}"));
                format!("Ticker: {ticker}\nCurrent Price: {price}\nAnalysis:\n{analysis}")
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        self.complete(
            &self.config.synthesis_model,
            system::ranking(industry),
            user::ranking(industry, &analysis_text),
            self.config.synthesis_max_tokens,
        )
        .await
        .map_err(|e| PipelineError::completion(industry, "ranking", e))
    }

    /// Suggest comparable companies for a ticker based on its fetched data
    ///
    /// Explicit operation; not part of the automatic run.
    pub async fn suggest_comparables(&self, ticker: &str, data: &StockData) -> Result<Vec<String>> {
        let news_text = self.news_block(&data.news).await;
        let text = self
            .complete(
                &self.config.analysis_model,
                system::comparables(ticker),
                user::comparables(
                    &history_tail_text(&data.history, HISTORY_TAIL_ROWS),
                    &data.balance_sheet.to_text(),
                    &data.financials.to_text(),
                    &news_text,
                ),
                self.config.analysis_max_tokens,
            )
            .await
            .map_err(|e| PipelineError::completion(ticker, "comparables", e))?;

        parse_ticker_list(&text)
    }

    /// Produce a detailed comparison of two companies
    ///
    /// Explicit operation; not part of the automatic run.
    pub async fn compare_companies(
        &self,
        main: &str,
        main_data: &StockData,
        peer: &str,
        peer_data: &StockData,
    ) -> Result<String> {
        self.complete(
            &self.config.synthesis_model,
            system::comparison(main, peer),
            user::comparison(
                main,
                &history_tail_text(&main_data.history, HISTORY_TAIL_ROWS),
                &main_data.balance_sheet.to_text(),
                &main_data.financials.to_text(),
                peer,
                &history_tail_text(&peer_data.history, HISTORY_TAIL_ROWS),
                &peer_data.balance_sheet.to_text(),
                &peer_data.financials.to_text(),
            ),
            self.config.synthesis_max_tokens,
        )
        .await
        .map_err(|e| PipelineError::completion(main, "comparison", e))
    }

    /// Fetch all market data for a ticker
    pub async fn fetch_stock_data(&self, ticker: &str) -> Result<StockData> {
        let window = Duration::days(self.config.history_window_days);

        let history = self
            .market
            .fetch_history(ticker, window)
            .await
            .map_err(|e| PipelineError::data_fetch(ticker, e))?;
        let balance_sheet = self
            .market
            .fetch_balance_sheet(ticker)
            .await
            .map_err(|e| PipelineError::data_fetch(ticker, e))?;
        let financials = self
            .market
            .fetch_financials(ticker)
            .await
            .map_err(|e| PipelineError::data_fetch(ticker, e))?;
        let news = self
            .market
            .fetch_news(ticker)
            .await
            .map_err(|e| PipelineError::data_fetch(ticker, e))?;

        Ok(StockData {
            history,
            balance_sheet,
            financials,
            news,
        })
    }

    /// Summarize news sentiment for a ticker
    async fn sentiment_analysis(&self, ticker: &str, news: &[NewsItem]) -> Result<String> {
        let news_text = self.news_block(news).await;

        self.complete(
            &self.config.analysis_model,
            system::sentiment(ticker),
            user::sentiment(ticker, &news_text),
            self.config.analysis_max_tokens,
        )
        .await
        .map_err(|e| PipelineError::completion(ticker, "sentiment", e))
    }

    /// Analyze the ticker's industry and sector
    async fn industry_analysis(&self, ticker: &str) -> Result<String> {
        let classification = self
            .market
            .fetch_classification(ticker)
            .await
            .map_err(|e| PipelineError::data_fetch(ticker, e))?;

        self.complete(
            &self.config.analysis_model,
            system::industry_analysis(&classification.industry, &classification.sector),
            user::industry_analysis(&classification.industry, &classification.sector),
            self.config.analysis_max_tokens,
        )
        .await
        .map_err(|e| PipelineError::completion(ticker, "industry analysis", e))
    }

    /// Synthesize the final recommendation for a ticker
    ///
    /// `comparisons` is a reserved slot for peer-comparison data; the
    /// automatic run passes `None` and the prompt carries an empty structure.
    async fn final_analysis(
        &self,
        ticker: &str,
        comparisons: Option<&str>,
        sentiment: &str,
        ratings: &str,
        industry_analysis: &str,
    ) -> Result<String> {
        self.complete(
            &self.config.synthesis_model,
            system::final_analysis(ticker),
            user::final_analysis(
                ticker,
                comparisons.unwrap_or("{}"),
                sentiment,
                ratings,
                industry_analysis,
            ),
            self.config.synthesis_max_tokens,
        )
        .await
        .map_err(|e| PipelineError::completion(ticker, "final analysis", e))
    }

    /// Assemble the dated article block for sentiment and comparison prompts
    ///
    /// Article bodies are fetched best-effort; an unreachable article
    /// contributes a placeholder instead of failing the block.
    async fn news_block(&self, news: &[NewsItem]) -> String {
        let mut block = String::new();
        for item in news {
            let body = self.articles.article_text(&item.link).await;
            block.push_str(&format!(
                "\n\n---\n\nDate: {}\nTitle: {}\nText: {}",
                item.published_at.format("%Y-%m-%d"),
                item.title,
                body
            ));
        }
        block.trim().to_string()
    }

    async fn complete(
        &self,
        model: &str,
        system: String,
        content: String,
        max_tokens: usize,
    ) -> investor_llm::Result<String> {
        let request = CompletionRequest::new(model, Message::user(content))
            .with_system(system)
            .with_max_tokens(max_tokens)
            .with_temperature(self.config.temperature);

        let response = self.llm.complete(request).await?;
        if response.is_truncated() {
            warn!(model, "Completion hit the max-token bound");
        }
        Ok(response.text)
    }
}

/// Parse a model response into a list of trimmed ticker symbols
///
/// The prompt contract demands a JSON array of strings; anything else is a
/// generation failure. The parse is deterministic: the same text always
/// yields the same ordered symbols.
pub fn parse_ticker_list(text: &str) -> Result<Vec<String>> {
    let start = text.find('[');
    let end = text.rfind(']');

    let (Some(start), Some(end)) = (start, end) else {
        return Err(PipelineError::Generation(format!(
            "response contained no JSON array: {text:?}"
        )));
    };
    if end < start {
        return Err(PipelineError::Generation(format!(
            "response contained no JSON array: {text:?}"
        )));
    }

    let symbols: Vec<String> = serde_json::from_str(&text[start..=end])
        .map_err(|e| PipelineError::Generation(format!("response was not a JSON array: {e}")))?;

    let symbols: Vec<String> = symbols
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(PipelineError::Generation(
            "response contained no ticker symbols".to_string(),
        ));
    }

    Ok(symbols)
}

/// Summarize the most recent analyst recommendation
///
/// `records` is expected oldest first; with no records the summary is the
/// fixed no-ratings message.
pub fn rating_summary(ticker: &str, records: &[Recommendation]) -> String {
    let Some(latest) = records.last() else {
        return NO_RATINGS_AVAILABLE.to_string();
    };

    format!(
        "Latest analyst rating for {ticker}:\nFirm: {}\nTo Grade: {}\nAction: {}",
        latest.firm.as_deref().unwrap_or("N/A"),
        latest.to_grade.as_deref().unwrap_or("N/A"),
        latest.action.as_deref().unwrap_or("N/A"),
    )
}
