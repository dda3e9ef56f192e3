//! End-to-end pipeline runs against mocked collaborators

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use investor_core::{
    AnalystConfig, IndustryAnalyst, NO_RATINGS_AVAILABLE, PipelineStage, PriceCache, StockData,
    TickerStatus,
};
use investor_llm::{
    CompletionRequest, CompletionResponse, LlmProvider, StopReason, TokenUsage,
};
use investor_market::{
    ARTICLE_UNAVAILABLE, ArticleSource, Classification, FinancialStatement, MarketDataSource,
    MarketError, NewsItem, Quote, Recommendation, StatementRow,
};
use mockall::mock;
use std::sync::{Arc, Mutex};

mock! {
    Llm {}

    #[async_trait]
    impl LlmProvider for Llm {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> investor_llm::Result<CompletionResponse>;

        fn name(&self) -> &str;
    }
}

mock! {
    Market {}

    #[async_trait]
    impl MarketDataSource for Market {
        async fn fetch_history(
            &self,
            ticker: &str,
            window: Duration,
        ) -> investor_market::Result<Vec<Quote>>;

        async fn fetch_balance_sheet(
            &self,
            ticker: &str,
        ) -> investor_market::Result<FinancialStatement>;

        async fn fetch_financials(
            &self,
            ticker: &str,
        ) -> investor_market::Result<FinancialStatement>;

        async fn fetch_news(&self, ticker: &str) -> investor_market::Result<Vec<NewsItem>>;

        async fn fetch_recommendations(
            &self,
            ticker: &str,
        ) -> investor_market::Result<Vec<Recommendation>>;

        async fn fetch_classification(
            &self,
            ticker: &str,
        ) -> investor_market::Result<Classification>;

        async fn fetch_intraday_price(&self, ticker: &str) -> investor_market::Result<f64>;
    }
}

mock! {
    Articles {}

    #[async_trait]
    impl ArticleSource for Articles {
        async fn article_text(&self, url: &str) -> String;
    }
}

fn response(text: &str) -> CompletionResponse {
    CompletionResponse {
        text: text.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        },
    }
}

/// Completion mock that answers every prompt by shape and records each request
fn scripted_llm(
    ticker_list: &'static str,
    seen: Arc<Mutex<Vec<CompletionRequest>>>,
) -> MockLlm {
    let mut llm = MockLlm::new();
    llm.expect_complete().returning(move |request| {
        let content = request
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        seen.lock().unwrap().push(request);

        let text = if content.contains("ticker symbols") {
            ticker_list.to_string()
        } else if content.starts_with("News articles for") {
            "Sentiment is cautiously positive.".to_string()
        } else if content.starts_with("Provide an analysis of the") {
            "The industry is growing steadily.".to_string()
        } else if content.contains("rank the companies") {
            "1. MSFT 2. AMZN".to_string()
        } else {
            "Hold. Solid fundamentals, rich valuation.".to_string()
        };
        Ok(response(&text))
    });
    llm
}

fn sample_quotes(symbol: &str) -> Vec<Quote> {
    (1..=10)
        .map(|day| Quote {
            symbol: symbol.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            open: 100.0,
            high: 102.0,
            low: 99.0,
            close: 101.0,
            volume: 1_000_000,
            adjclose: 101.0,
        })
        .collect()
}

fn sample_statement() -> FinancialStatement {
    FinancialStatement {
        periods: vec![NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()],
        rows: vec![StatementRow {
            label: "totalAssets".to_string(),
            values: vec![Some(1_000_000.0)],
        }],
    }
}

fn sample_news(symbol: &str) -> Vec<NewsItem> {
    vec![NewsItem {
        title: format!("{symbol} beats expectations"),
        publisher: "Newswire".to_string(),
        link: format!("https://news.example/{symbol}"),
        published_at: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
    }]
}

fn sample_recommendations() -> Vec<Recommendation> {
    vec![Recommendation {
        firm: Some("Big Bank".to_string()),
        to_grade: Some("Buy".to_string()),
        action: Some("up".to_string()),
        date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
    }]
}

/// Market mock where every fetch succeeds with fixture data
fn healthy_market() -> MockMarket {
    let mut market = MockMarket::new();
    market
        .expect_fetch_history()
        .returning(|ticker, _| Ok(sample_quotes(ticker)));
    market
        .expect_fetch_balance_sheet()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_financials()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_news()
        .returning(|ticker| Ok(sample_news(ticker)));
    market
        .expect_fetch_recommendations()
        .returning(|_| Ok(sample_recommendations()));
    market.expect_fetch_classification().returning(|_| {
        Ok(Classification {
            industry: "Software".to_string(),
            sector: "Technology".to_string(),
        })
    });
    market
        .expect_fetch_intraday_price()
        .returning(|_| Ok(420.69));
    market
}

fn article_stub(body: &'static str) -> MockArticles {
    let mut articles = MockArticles::new();
    articles
        .expect_article_text()
        .returning(move |_| body.to_string());
    articles
}

fn analyst(llm: MockLlm, market: MockMarket, articles: MockArticles) -> IndustryAnalyst {
    IndustryAnalyst::new(
        Arc::new(llm),
        Arc::new(market),
        Arc::new(articles),
        AnalystConfig::builder().max_tickers(2).build().unwrap(),
        PriceCache::new(),
    )
}

#[tokio::test]
async fn test_run_finishes_all_tickers() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let analyst = analyst(
        scripted_llm(r#"["MSFT", "AMZN"]"#, seen.clone()),
        healthy_market(),
        article_stub("Shares rallied after earnings."),
    );

    analyst.run("Cloud Computing").await.unwrap();

    let snapshot = analyst.state().snapshot();
    assert_eq!(snapshot.industry, "Cloud Computing");
    assert_eq!(snapshot.stage, PipelineStage::Ranking);
    assert!(snapshot.all_terminal());
    assert_eq!(snapshot.status_of("MSFT"), Some(TickerStatus::Finished));
    assert_eq!(snapshot.status_of("AMZN"), Some(TickerStatus::Finished));
    assert!(!snapshot.analysis_of("MSFT").unwrap().is_empty());
    assert!(!snapshot.analysis_of("AMZN").unwrap().is_empty());

    // Intraday prices were recorded for both tickers
    assert_eq!(analyst.prices().get("MSFT"), Some(420.69));
    assert_eq!(analyst.prices().get("AMZN"), Some(420.69));
}

#[tokio::test]
async fn test_data_failure_isolated_to_one_ticker() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut market = MockMarket::new();
    market.expect_fetch_history().returning(|ticker, _| {
        if ticker == "XYZ" {
            Err(MarketError::DataUnavailable {
                symbol: "XYZ".to_string(),
                reason: "no price history".to_string(),
            })
        } else {
            Ok(sample_quotes(ticker))
        }
    });
    market
        .expect_fetch_balance_sheet()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_financials()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_news()
        .returning(|ticker| Ok(sample_news(ticker)));
    market
        .expect_fetch_recommendations()
        .returning(|_| Ok(sample_recommendations()));
    market.expect_fetch_classification().returning(|_| {
        Ok(Classification {
            industry: "Software".to_string(),
            sector: "Technology".to_string(),
        })
    });
    market
        .expect_fetch_intraday_price()
        .returning(|_| Ok(123.45));

    let analyst = analyst(
        scripted_llm(r#"["XYZ", "MSFT"]"#, seen),
        market,
        article_stub("Body."),
    );

    analyst.run("Cloud Computing").await.unwrap();

    let snapshot = analyst.state().snapshot();
    assert_eq!(snapshot.stage, PipelineStage::Ranking);
    assert_eq!(snapshot.status_of("XYZ"), Some(TickerStatus::Failed));
    assert!(snapshot.analysis_of("XYZ").is_none());
    assert_eq!(snapshot.status_of("MSFT"), Some(TickerStatus::Finished));
    assert!(snapshot.analysis_of("MSFT").is_some());
}

#[tokio::test]
async fn test_unparseable_ticker_list_fails_run() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let analyst = analyst(
        scripted_llm("I would suggest looking at Microsoft and Amazon.", seen),
        MockMarket::new(),
        MockArticles::new(),
    );

    assert!(analyst.run("Cloud Computing").await.is_err());

    let snapshot = analyst.state().snapshot();
    assert_eq!(snapshot.stage, PipelineStage::Failed);
    assert!(snapshot.tickers.is_empty());
    assert!(snapshot.error.is_some());
}

#[tokio::test]
async fn test_empty_industry_fails_run() {
    let analyst = analyst(MockLlm::new(), MockMarket::new(), MockArticles::new());

    assert!(analyst.run("   ").await.is_err());
    assert_eq!(analyst.state().snapshot().stage, PipelineStage::Failed);
}

#[tokio::test]
async fn test_missing_ratings_use_fixed_message() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut market = MockMarket::new();
    market
        .expect_fetch_history()
        .returning(|ticker, _| Ok(sample_quotes(ticker)));
    market
        .expect_fetch_balance_sheet()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_financials()
        .returning(|_| Ok(sample_statement()));
    market
        .expect_fetch_news()
        .returning(|ticker| Ok(sample_news(ticker)));
    market.expect_fetch_recommendations().returning(|_| Ok(vec![]));
    market.expect_fetch_classification().returning(|_| {
        Ok(Classification {
            industry: "Software".to_string(),
            sector: "Technology".to_string(),
        })
    });
    market
        .expect_fetch_intraday_price()
        .returning(|_| Ok(100.0));

    let analyst = analyst(
        scripted_llm(r#"["ABC"]"#, seen.clone()),
        market,
        article_stub("Body."),
    );
    analyst.run("Cloud Computing").await.unwrap();

    let requests = seen.lock().unwrap();
    let final_prompt = requests
        .iter()
        .map(|r| r.messages[0].content.as_str())
        .find(|c| c.contains("Analyst Ratings:"))
        .expect("final analysis prompt was sent");
    assert!(final_prompt.contains(NO_RATINGS_AVAILABLE));
}

#[tokio::test]
async fn test_unreachable_articles_degrade_to_placeholder() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let analyst = analyst(
        scripted_llm(r#"["MSFT"]"#, seen.clone()),
        healthy_market(),
        article_stub(ARTICLE_UNAVAILABLE),
    );

    analyst.run("Cloud Computing").await.unwrap();
    assert_eq!(
        analyst.state().snapshot().status_of("MSFT"),
        Some(TickerStatus::Finished)
    );

    let requests = seen.lock().unwrap();
    let sentiment_prompt = requests
        .iter()
        .map(|r| r.messages[0].content.as_str())
        .find(|c| c.starts_with("News articles for"))
        .expect("sentiment prompt was sent");
    assert!(sentiment_prompt.contains(ARTICLE_UNAVAILABLE));
    assert!(sentiment_prompt.contains("Date: 2024-03-10"));
}

#[tokio::test]
async fn test_rank_embeds_prices_and_analyses() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let analyst = analyst(
        scripted_llm(r#"["MSFT"]"#, seen.clone()),
        MockMarket::new(),
        MockArticles::new(),
    );

    let analyses = vec![
        ("MSFT".to_string(), "Buy.".to_string()),
        ("AMZN".to_string(), "Hold.".to_string()),
    ];
    let mut prices = std::collections::HashMap::new();
    prices.insert("MSFT".to_string(), 420.69);

    let ranking = analyst
        .rank("Cloud Computing", &analyses, &prices)
        .await
        .unwrap();
    assert!(!ranking.is_empty());

    let requests = seen.lock().unwrap();
    let prompt = requests[0].messages[0].content.as_str();
    assert!(prompt.contains("Ticker: MSFT\nCurrent Price: 420.69"));
    assert!(prompt.contains("Ticker: AMZN\nCurrent Price: N/A"));
    assert!(prompt.contains("Analysis:\nBuy."));
}

#[tokio::test]
async fn test_suggest_comparables_parses_response() {
    let mut llm = MockLlm::new();
    llm.expect_complete()
        .returning(|_| Ok(response(r#"["ADBE", "CRM"]"#)));

    let analyst = analyst(llm, MockMarket::new(), MockArticles::new());
    let data = StockData {
        history: sample_quotes("MSFT"),
        balance_sheet: sample_statement(),
        financials: sample_statement(),
        news: vec![],
    };

    let peers = analyst.suggest_comparables("MSFT", &data).await.unwrap();
    assert_eq!(peers, vec!["ADBE", "CRM"]);
}

#[tokio::test]
async fn test_compare_companies_names_both_tickers() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let analyst = analyst(
        scripted_llm("irrelevant", seen.clone()),
        MockMarket::new(),
        MockArticles::new(),
    );

    let data = StockData {
        history: sample_quotes("MSFT"),
        balance_sheet: sample_statement(),
        financials: sample_statement(),
        news: vec![],
    };

    analyst
        .compare_companies("MSFT", &data, "AMZN", &data)
        .await
        .unwrap();

    let requests = seen.lock().unwrap();
    let prompt = requests[0].messages[0].content.as_str();
    assert!(prompt.contains("Data for MSFT:"));
    assert!(prompt.contains("Data for AMZN:"));
}
