use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::Result;

// ---------------------------------------------------------------------------
// CacheEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Point-in-time view of one cache slot, reported by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryInfo {
    pub key: String,
    pub age_secs: u64,
    pub ttl_secs: u64,
    pub fresh: bool,
}

// ---------------------------------------------------------------------------
// ResultCache
// ---------------------------------------------------------------------------

/// Keyed TTL cache fronting the spreadsheet.
///
/// Entries are overwritten on refresh and never removed; a stale entry simply
/// stops being served. Failed loads are not cached, so the next call retries.
///
/// Misses on the same key are serialized through a per-key gate: while one
/// caller runs the loader, later callers wait and then read what it stored.
pub struct ResultCache<T> {
    /// key → last successful load
    entries: DashMap<String, CacheEntry<T>>,
    /// key → single-flight gate held while loading
    gates: DashMap<String, Arc<Mutex<()>>>,
}

impl<T: Clone> ResultCache<T> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fresh value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh() {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store `value` under `key`; the TTL window starts now.
    pub fn set(&self, key: &str, value: T, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            CacheEntry { value, stored_at: Instant::now(), ttl },
        );
    }

    /// Cache-aside read. Returns the fresh cached value, or runs `loader`,
    /// stores its output and returns it. Loader errors propagate uncached.
    pub async fn get_or_load<F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.get(key) {
            debug!(cache_key = key, "cache hit");
            return Ok(value);
        }

        let gate = self.gate(key);
        let _guard = gate.lock().await;

        // Another caller may have loaded while we waited on the gate.
        if let Some(value) = self.get(key) {
            debug!(cache_key = key, "cache filled while waiting");
            return Ok(value);
        }

        info!(cache_key = key, "cache miss, loading from source");
        let value = loader().await?;
        self.set(key, value.clone(), ttl);
        Ok(value)
    }

    /// Snapshot of every slot ever stored, sorted by key.
    pub fn entries(&self) -> Vec<CacheEntryInfo> {
        let mut out: Vec<CacheEntryInfo> = self
            .entries
            .iter()
            .map(|e| CacheEntryInfo {
                key: e.key().clone(),
                age_secs: e.stored_at.elapsed().as_secs(),
                ttl_secs: e.ttl.as_secs(),
                fresh: e.is_fresh(),
            })
            .collect();
        out.sort_by(|a, b| a.key.cmp(&b.key));
        out
    }

    fn gate(&self, key: &str) -> Arc<Mutex<()>> {
        self.gates
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            gates: DashMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
