//! User-message content for the analysis prompts

/// Ticker-idea generation
pub fn ticker_ideas(count: usize, industry: &str) -> String {
    format!(
        "Please provide a list of {count} ticker symbols for major companies in the {industry} \
         industry as a JSON array of strings. Only respond with the array, no other text."
    )
}

/// News sentiment analysis over the assembled article block
pub fn sentiment(ticker: &str, news_text: &str) -> String {
    format!(
        "News articles for {ticker}:\n{news_text}\n\n----\n\nProvide a summary of the overall \
         sentiment and any notable changes over time."
    )
}

/// Industry and sector analysis
pub fn industry_analysis(industry: &str, sector: &str) -> String {
    format!("Provide an analysis of the {industry} industry and {sector} sector.")
}

/// Final buy/hold/sell recommendation synthesizing the earlier analyses
pub fn final_analysis(
    ticker: &str,
    comparisons: &str,
    sentiment_analysis: &str,
    analyst_ratings: &str,
    industry_analysis: &str,
) -> String {
    format!(
        "Ticker: {ticker}\n\nComparative Analysis:\n{comparisons}\n\nSentiment Analysis:\n\
         {sentiment_analysis}\n\nAnalyst Ratings:\n{analyst_ratings}\n\nIndustry Analysis:\n\
         {industry_analysis}\n\nBased on the provided data and analyses, please provide a \
         comprehensive investment analysis and recommendation for {ticker}. Consider the \
         company's financial strength, growth prospects, competitive position, and potential \
         risks. Provide a clear and concise recommendation on whether to buy, hold, or sell \
         the stock, along with supporting rationale."
    )
}

/// Cross-company ranking over the assembled analysis block
pub fn ranking(industry: &str, analysis_text: &str) -> String {
    format!(
        "Industry: {industry}\n\nCompany Analyses:\n{analysis_text}\n\nBased on the provided \
         analyses, please rank the companies from most attractive to least attractive for \
         investment. Provide a brief rationale for your ranking. In each rationale, include \
         the current price (if available) and a price target."
    )
}

/// Comparable-company suggestions over the fetched data
pub fn comparables(
    history_text: &str,
    balance_sheet_text: &str,
    financials_text: &str,
    news_text: &str,
) -> String {
    format!(
        "Historical price data:\n{history_text}\n\nBalance Sheet:\n{balance_sheet_text}\n\n\
         Financial Statements:\n{financials_text}\n\nNews articles:\n{news_text}\n\n----\n\n\
         Now, suggest a few comparable companies to consider, as a JSON array of strings. \
         Return nothing but the array. Make sure the companies are in the form of their tickers."
    )
}

/// Side-by-side company comparison
#[allow(clippy::too_many_arguments)]
pub fn comparison(
    main: &str,
    main_history: &str,
    main_balance_sheet: &str,
    main_financials: &str,
    peer: &str,
    peer_history: &str,
    peer_balance_sheet: &str,
    peer_financials: &str,
) -> String {
    format!(
        "Data for {main}:\n\nHistorical price data:\n{main_history}\n\nBalance Sheet:\n\
         {main_balance_sheet}\n\nFinancial Statements:\n{main_financials}\n\n----\n\n\
         Data for {peer}:\n\nHistorical price data:\n{peer_history}\n\nBalance Sheet:\n\
         {peer_balance_sheet}\n\nFinancial Statements:\n{peer_financials}\n\n----\n\n\
         Now, provide a detailed comparison of {main} against {peer}. Explain your thinking \
         very clearly."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_ideas_demands_json_array() {
        let content = ticker_ideas(2, "Cloud Computing");
        assert!(content.contains("JSON array"));
        assert!(content.contains("Only respond with the array"));
    }

    #[test]
    fn test_final_analysis_embeds_sections() {
        let content = final_analysis("MSFT", "{}", "positive", "Buy from Firm", "growing");
        assert!(content.contains("Sentiment Analysis:\npositive"));
        assert!(content.contains("Analyst Ratings:\nBuy from Firm"));
        assert!(content.contains("buy, hold, or sell"));
    }

    #[test]
    fn test_ranking_mentions_price_target() {
        let content = ranking("Cloud Computing", "Ticker: MSFT ...");
        assert!(content.contains("price target"));
    }
}
