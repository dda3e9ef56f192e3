//! Process-wide last-observed-price cache
//!
//! Shared across runs; a later run overwrites entries for the same ticker.
//! Entries are never evicted. Writes are per-key atomic with
//! last-writer-wins semantics.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared map of ticker -> last observed price
pub struct PriceCache {
    inner: Arc<RwLock<HashMap<String, f64>>>,
}

impl PriceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record the last observed price for a ticker
    pub fn insert(&self, symbol: &str, price: f64) {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.insert(symbol.to_string(), price);
    }

    /// Last observed price for a ticker, if any run recorded one
    pub fn get(&self, symbol: &str) -> Option<f64> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(symbol).copied()
    }

    /// Copy of the whole cache
    pub fn all(&self) -> HashMap<String, f64> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.clone()
    }

    /// Number of tickers with a recorded price
    pub fn len(&self) -> usize {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.len()
    }

    /// True when no price has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PriceCache {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache = PriceCache::new();
        assert!(cache.is_empty());

        cache.insert("MSFT", 425.11);
        assert_eq!(cache.get("MSFT"), Some(425.11));
        assert_eq!(cache.get("AMZN"), None);
    }

    #[test]
    fn test_last_writer_wins() {
        let cache = PriceCache::new();
        cache.insert("MSFT", 425.11);
        cache.insert("MSFT", 430.02);
        assert_eq!(cache.get("MSFT"), Some(430.02));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = PriceCache::new();
        let handle = cache.clone();

        handle.insert("AMZN", 180.5);
        assert_eq!(cache.get("AMZN"), Some(180.5));
    }
}
