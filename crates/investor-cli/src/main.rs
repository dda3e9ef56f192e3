//! Command-line interface for the industry analysis pipeline

use anyhow::Context;
use clap::Parser;
use investor_core::{
    AnalystConfig, IndustryAnalyst, PipelineStage, PriceCache, TickerStatus, logging,
};
use investor_llm::AnthropicProvider;
use investor_market::{HttpArticleFetcher, YahooMarketData};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "investor")]
#[command(about = "Industry stock analysis via market data and a completion service", long_about = None)]
struct Args {
    /// Industry to analyze (e.g. "Cloud Computing")
    industry: String,

    /// How many ticker ideas to analyze
    #[arg(short, long)]
    count: Option<usize>,

    /// Skip the final cross-company ranking
    #[arg(long)]
    no_ranking: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let args = Args::parse();

    let mut config = AnalystConfig::from_env().context("Invalid configuration")?;
    if let Some(count) = args.count {
        config.max_tickers = count;
        config.validate().context("Invalid configuration")?;
    }

    let provider =
        AnthropicProvider::from_env().context("ANTHROPIC_API_KEY must be set and valid")?;
    let market = YahooMarketData::new().context("Failed to set up market-data client")?;
    let articles = HttpArticleFetcher::new().context("Failed to set up article fetcher")?;

    let analyst = Arc::new(IndustryAnalyst::new(
        Arc::new(provider),
        Arc::new(market),
        Arc::new(articles),
        config,
        PriceCache::new(),
    ));

    info!(industry = %args.industry, "Starting analysis");
    println!("Analyzing the {} industry...", args.industry);

    let mut updates = analyst.state().subscribe();
    let runner = {
        let analyst = Arc::clone(&analyst);
        let industry = args.industry.clone();
        tokio::spawn(async move { analyst.run(&industry).await })
    };

    // Echo ticker progress until the run reaches a terminal stage.
    let mut reported: HashMap<String, TickerStatus> = HashMap::new();
    loop {
        if updates.changed().await.is_err() {
            break;
        }
        let snapshot = updates.borrow_and_update().clone();

        for ticker in &snapshot.tickers {
            if reported.get(&ticker.symbol) != Some(&ticker.status) {
                reported.insert(ticker.symbol.clone(), ticker.status);
                let word = match ticker.status {
                    TickerStatus::Pending => "queued",
                    TickerStatus::Processing => "analyzing",
                    TickerStatus::Finished => "done",
                    TickerStatus::Failed => "failed",
                };
                println!("  {} {}", ticker.symbol, word);
            }
        }

        if matches!(
            snapshot.stage,
            PipelineStage::Ranking | PipelineStage::Failed
        ) {
            break;
        }
    }

    runner.await.context("Analysis task panicked")??;

    let snapshot = analyst.state().snapshot();
    let analyses = snapshot.ordered_analyses();
    if analyses.is_empty() {
        anyhow::bail!("No ticker produced an analysis");
    }

    for (ticker, analysis) in &analyses {
        let price = analyst
            .prices()
            .get(ticker)
            .map_or_else(|| "N/A".to_string(), |p| format!("{p:.2}"));
        println!("\n==== {ticker} (last price: {price}) ====\n{analysis}");
    }

    if !args.no_ranking {
        println!("\nRanking companies...");
        let ranking = analyst
            .rank(&snapshot.industry, &analyses, &analyst.prices().all())
            .await
            .context("Ranking failed")?;
        println!("\n==== Ranking ====\n{ranking}");
    }

    Ok(())
}
