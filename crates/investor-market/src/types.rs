//! Structured market-data records
//!
//! These are the records the pipeline embeds into completion prompts, so each
//! type knows how to render itself as plain text.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A single OHLCV bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// One line item of a financial statement, one value per reporting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRow {
    /// Line item label (e.g. "totalAssets")
    pub label: String,
    /// Value per period, aligned with [`FinancialStatement::periods`]
    pub values: Vec<Option<f64>>,
}

/// A balance sheet or income statement across reporting periods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialStatement {
    /// Reporting period end dates, most recent first
    pub periods: Vec<NaiveDate>,
    /// Line items
    pub rows: Vec<StatementRow>,
}

impl FinancialStatement {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the statement as a plain-text table for prompt embedding
    pub fn to_text(&self) -> String {
        if self.rows.is_empty() {
            return "(no data)".to_string();
        }

        let mut out = String::new();
        let header = self
            .periods
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>()
            .join("\t");
        let _ = writeln!(out, "\t{header}");
        for row in &self.rows {
            let values = row
                .values
                .iter()
                .map(|v| match v {
                    Some(x) => format!("{x}"),
                    None => "N/A".to_string(),
                })
                .collect::<Vec<_>>()
                .join("\t");
            let _ = writeln!(out, "{}\t{}", row.label, values);
        }
        out
    }
}

/// A news item for a ticker; the article body is fetched separately
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}

/// A single analyst recommendation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub firm: Option<String>,
    pub to_grade: Option<String>,
    pub action: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Industry/sector classification for a ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub industry: String,
    pub sector: String,
}

/// Render the most recent `n` bars of a price history as plain text
pub fn history_tail_text(quotes: &[Quote], n: usize) -> String {
    if quotes.is_empty() {
        return "(no data)".to_string();
    }

    let mut out = String::from("Date\tOpen\tHigh\tLow\tClose\tVolume\n");
    let start = quotes.len().saturating_sub(n);
    for q in &quotes[start..] {
        let _ = writeln!(
            out,
            "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}",
            q.timestamp.format("%Y-%m-%d"),
            q.open,
            q.high,
            q.low,
            q.close,
            q.volume
        );
    }
    out
}
