//! Run-state store and progress publication
//!
//! The pipeline is the only writer; presentation layers read. Every mutation
//! replaces the published snapshot atomically through a `tokio::sync::watch`
//! channel, so readers never observe a ticker marked finished without its
//! analysis entry, or any other torn intermediate state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::watch;

/// Per-ticker progress status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerStatus {
    /// Queued, no work started
    Pending,
    /// Sub-pipeline in flight
    Processing,
    /// Analysis completed; the snapshot holds the result
    Finished,
    /// Sub-pipeline failed; no result recorded
    Failed,
}

/// Overall run progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// No run submitted yet
    Stopped,
    /// Per-ticker analysis in progress
    Analyzing,
    /// Every ticker reached a terminal status; ranking may be requested
    Ranking,
    /// Ticker generation failed; no ticker work was done
    Failed,
}

/// One ticker and its status, in generation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    pub status: TickerStatus,
}

/// Immutable view of a run's progress and results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Industry under analysis; empty before the first run
    pub industry: String,
    /// Overall run stage
    pub stage: PipelineStage,
    /// Tickers in generation order; entries are never removed
    pub tickers: Vec<TickerEntry>,
    /// Final analysis text per finished ticker
    pub analyses: HashMap<String, String>,
    /// Run-level failure diagnostic, set when `stage` is `Failed`
    pub error: Option<String>,
}

impl RunSnapshot {
    fn empty() -> Self {
        Self {
            industry: String::new(),
            stage: PipelineStage::Stopped,
            tickers: Vec::new(),
            analyses: HashMap::new(),
            error: None,
        }
    }

    /// Status of a ticker, if present in this run
    pub fn status_of(&self, symbol: &str) -> Option<TickerStatus> {
        self.tickers
            .iter()
            .find(|t| t.symbol == symbol)
            .map(|t| t.status)
    }

    /// Final analysis for a ticker, if finished
    pub fn analysis_of(&self, symbol: &str) -> Option<&str> {
        self.analyses.get(symbol).map(String::as_str)
    }

    /// True when every ticker reached `Finished` or `Failed`
    pub fn all_terminal(&self) -> bool {
        self.tickers
            .iter()
            .all(|t| matches!(t.status, TickerStatus::Finished | TickerStatus::Failed))
    }

    /// Finished analyses in ticker-generation order
    pub fn ordered_analyses(&self) -> Vec<(String, String)> {
        self.tickers
            .iter()
            .filter_map(|t| {
                self.analyses
                    .get(&t.symbol)
                    .map(|a| (t.symbol.clone(), a.clone()))
            })
            .collect()
    }
}

/// Shared state store publishing atomic run snapshots
///
/// Cloning the store shares the underlying channel. Only the pipeline should
/// mutate; readers use [`StateStore::snapshot`] or [`StateStore::subscribe`].
pub struct StateStore {
    tx: watch::Sender<RunSnapshot>,
}

impl StateStore {
    /// Create a store with no run submitted
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RunSnapshot::empty());
        Self { tx }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> RunSnapshot {
        self.tx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<RunSnapshot> {
        self.tx.subscribe()
    }

    /// Replace all run state for a new industry query
    ///
    /// Every ticker starts `Pending`; the stage becomes `Analyzing`.
    pub fn begin_run(&self, industry: &str, tickers: Vec<String>) {
        self.tx.send_modify(|state| {
            *state = RunSnapshot {
                industry: industry.to_string(),
                stage: PipelineStage::Analyzing,
                tickers: tickers
                    .into_iter()
                    .map(|symbol| TickerEntry {
                        symbol,
                        status: TickerStatus::Pending,
                    })
                    .collect(),
                analyses: HashMap::new(),
                error: None,
            };
        });
    }

    /// Mark a run as failed before any ticker work (generation failure)
    pub fn fail_run(&self, industry: &str, diagnostic: String) {
        self.tx.send_modify(|state| {
            *state = RunSnapshot {
                industry: industry.to_string(),
                stage: PipelineStage::Failed,
                tickers: Vec::new(),
                analyses: HashMap::new(),
                error: Some(diagnostic),
            };
        });
    }

    /// Transition a ticker `Pending` -> `Processing`
    pub fn mark_processing(&self, symbol: &str) {
        self.set_status(symbol, TickerStatus::Processing);
    }

    /// Transition a ticker `Processing` -> `Finished` and record its analysis
    ///
    /// Both mutations land in one snapshot update.
    pub fn mark_finished(&self, symbol: &str, analysis: String) {
        self.tx.send_modify(|state| {
            if let Some(entry) = state.tickers.iter_mut().find(|t| t.symbol == symbol) {
                entry.status = TickerStatus::Finished;
                state.analyses.insert(symbol.to_string(), analysis);
            }
        });
    }

    /// Transition a ticker `Processing` -> `Failed`
    pub fn mark_failed(&self, symbol: &str) {
        self.set_status(symbol, TickerStatus::Failed);
    }

    /// Advance the run stage
    pub fn set_stage(&self, stage: PipelineStage) {
        self.tx.send_modify(|state| {
            state.stage = stage;
        });
    }

    fn set_status(&self, symbol: &str, status: TickerStatus) {
        self.tx.send_modify(|state| {
            if let Some(entry) = state.tickers.iter_mut().find(|t| t.symbol == symbol) {
                entry.status = status;
            }
        });
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}
