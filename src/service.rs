use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{cache_keys, Config};
use crate::error::{AppError, Result};
use crate::source::RowSource;
use crate::state::{CacheEntryInfo, ResultCache};
use crate::transform::{format_daily, normalize_realtime};
use crate::types::{DailyResult, RealtimeResult};

pub type RealtimeResults = Arc<Vec<RealtimeResult>>;
pub type DailyResults = Arc<Vec<DailyResult>>;

/// Cache-aside access to both datasets. Each dataset has its own cache, so the
/// two refresh independently.
pub struct LotteryService {
    source: Arc<dyn RowSource>,
    realtime_cache: Arc<ResultCache<RealtimeResults>>,
    daily_cache: Arc<ResultCache<DailyResults>>,
    realtime_range: String,
    daily_range: String,
    ttl: Duration,
}

impl LotteryService {
    pub fn new(cfg: &Config, source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            realtime_cache: ResultCache::new(),
            daily_cache: ResultCache::new(),
            realtime_range: cfg.realtime_range.clone(),
            daily_range: cfg.daily_range.clone(),
            ttl: Duration::from_secs(cfg.cache_ttl_secs),
        }
    }

    /// Deduplicated live feed, cached under `cache_key`.
    pub async fn realtime_results(&self, cache_key: &str) -> Result<RealtimeResults> {
        let source = &self.source;
        let range = self.realtime_range.as_str();
        self.realtime_cache
            .get_or_load(cache_key, self.ttl, || async move {
                let rows = source.fetch_range(range).await?;
                if rows.is_empty() {
                    warn!(range, "No data found in the response");
                    return Err(AppError::EmptySource(range.to_string()));
                }
                Ok(Arc::new(normalize_realtime(&rows)))
            })
            .await
    }

    /// Every daily row, cached under `dailyLotteryResults`.
    pub async fn daily_results(&self) -> Result<DailyResults> {
        let source = &self.source;
        let range = self.daily_range.as_str();
        self.daily_cache
            .get_or_load(cache_keys::DAILY_LOTTERY_RESULTS, self.ttl, || async move {
                let rows = source.fetch_range(range).await?;
                if rows.is_empty() {
                    warn!(range, "No data found in the response");
                    return Err(AppError::EmptySource(range.to_string()));
                }
                let results = format_daily(&rows);
                info!(entries = results.len(), "Daily results refreshed");
                Ok(Arc::new(results))
            })
            .await
    }

    /// State of every cache slot across both datasets.
    pub fn cache_entries(&self) -> Vec<CacheEntryInfo> {
        let mut entries = self.realtime_cache.entries();
        entries.extend(self.daily_cache.entries());
        entries
    }
}
