//! Yahoo Finance quoteSummary client
//!
//! The `yahoo_finance_api` crate covers quotes and history; fundamentals
//! (balance sheet, income statements), analyst recommendations, and the
//! industry/sector profile come from the quoteSummary endpoint, queried here
//! with a hand-rolled reqwest client.

use crate::error::{MarketError, Result};
use crate::types::{Classification, FinancialStatement, Recommendation, StatementRow};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

const QUOTE_SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Client for the quoteSummary endpoint
pub struct QuoteSummaryClient {
    client: Client,
}

impl QuoteSummaryClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; investor-rs)")
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_modules(&self, symbol: &str, modules: &str) -> Result<SummaryResult> {
        let url = format!("{QUOTE_SUMMARY_BASE}/{symbol}?modules={modules}");
        debug!(symbol, modules, "Fetching quoteSummary");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::ApiError(format!(
                "quoteSummary error {status}: {body}"
            )));
        }

        let envelope: SummaryEnvelope = response.json().await?;
        envelope
            .quote_summary
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| MarketError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "quoteSummary returned no result".to_string(),
            })
    }

    /// Balance sheet history for a symbol
    pub async fn balance_sheet(&self, symbol: &str) -> Result<FinancialStatement> {
        let result = self.fetch_modules(symbol, "balanceSheetHistory").await?;
        let statements = result
            .balance_sheet_history
            .map(|h| h.balance_sheet_statements)
            .unwrap_or_default();
        Ok(build_statement(&statements))
    }

    /// Income statement history for a symbol
    pub async fn income_statements(&self, symbol: &str) -> Result<FinancialStatement> {
        let result = self.fetch_modules(symbol, "incomeStatementHistory").await?;
        let statements = result
            .income_statement_history
            .map(|h| h.income_statement_history)
            .unwrap_or_default();
        Ok(build_statement(&statements))
    }

    /// Analyst upgrade/downgrade history, oldest first
    pub async fn recommendations(&self, symbol: &str) -> Result<Vec<Recommendation>> {
        let result = self.fetch_modules(symbol, "upgradeDowngradeHistory").await?;
        let mut records: Vec<Recommendation> = result
            .upgrade_downgrade_history
            .map(|h| h.history)
            .unwrap_or_default()
            .into_iter()
            .map(|r| Recommendation {
                firm: r.firm,
                to_grade: r.to_grade,
                action: r.action,
                date: r
                    .epoch_grade_date
                    .and_then(|ts| DateTime::from_timestamp(ts, 0)),
            })
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// Industry and sector classification from the asset profile
    pub async fn classification(&self, symbol: &str) -> Result<Classification> {
        let result = self.fetch_modules(symbol, "assetProfile").await?;
        let profile = result
            .asset_profile
            .ok_or_else(|| MarketError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no asset profile".to_string(),
            })?;

        match (profile.industry, profile.sector) {
            (Some(industry), Some(sector)) => Ok(Classification { industry, sector }),
            _ => Err(MarketError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "profile has no industry/sector".to_string(),
            }),
        }
    }
}

/// Combine per-period raw statements into one table, most recent period first
fn build_statement(statements: &[RawStatement]) -> FinancialStatement {
    let mut periods = Vec::new();
    let mut labels: BTreeMap<String, usize> = BTreeMap::new();

    for statement in statements {
        let Some(end) = statement.end_date.as_ref().and_then(RawValue::as_date) else {
            continue;
        };
        periods.push(end);
        for (label, value) in &statement.items {
            if value.get("raw").is_some() {
                labels.entry(label.clone()).or_insert(0);
            }
        }
    }

    let rows = labels
        .keys()
        .map(|label| StatementRow {
            label: label.clone(),
            values: statements
                .iter()
                .filter(|s| s.end_date.as_ref().and_then(RawValue::as_date).is_some())
                .map(|s| s.items.get(label).and_then(raw_number))
                .collect(),
        })
        .collect();

    FinancialStatement { periods, rows }
}

// Wire types matching the quoteSummary response shape

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    asset_profile: Option<AssetProfile>,
    balance_sheet_history: Option<BalanceSheetHistory>,
    income_statement_history: Option<IncomeStatementHistory>,
    upgrade_downgrade_history: Option<UpgradeDowngradeHistory>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    industry: Option<String>,
    sector: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceSheetHistory {
    balance_sheet_statements: Vec<RawStatement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomeStatementHistory {
    income_statement_history: Vec<RawStatement>,
}

#[derive(Debug, Deserialize)]
struct UpgradeDowngradeHistory {
    history: Vec<RawRecommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecommendation {
    firm: Option<String>,
    to_grade: Option<String>,
    action: Option<String>,
    epoch_grade_date: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawStatement {
    #[serde(rename = "endDate")]
    end_date: Option<RawValue>,
    // Line items are `{"raw": ..., "fmt": ...}` objects, but the payload also
    // carries plain scalars like maxAge, so the map stays untyped.
    #[serde(flatten)]
    items: BTreeMap<String, serde_json::Value>,
}

/// Extract the `raw` numeric value from a wrapped line item
fn raw_number(value: &serde_json::Value) -> Option<f64> {
    value.get("raw").and_then(serde_json::Value::as_f64)
}

/// Yahoo wraps every numeric field as `{"raw": ..., "fmt": ...}`
#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

impl RawValue {
    fn as_date(&self) -> Option<chrono::NaiveDate> {
        self.raw
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
            .map(|dt| dt.date_naive())
    }
}
