use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::debug;

/// Source of "now" for cache freshness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Used to simulate cache expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        let next = now.checked_add_signed(delta).unwrap_or(*now);
        *now = next;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub url: String,
    pub content: String,
    pub stored_at: DateTime<Utc>,
}

/// Process-wide URL → extracted content map.
///
/// Created once at startup and handed to the orchestrator through `AppState`.
/// Entries are fresh while `now - stored_at < ttl`; a stale entry is dropped
/// on read so the next request re-fetches and overwrites it. Overlapping
/// writes for the same URL are last-write-wins.
#[derive(Clone)]
pub struct ContentCache {
    entries: moka::future::Cache<String, CacheEntry>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCache")
            .field("ttl_secs", &self.ttl.num_seconds())
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl ContentCache {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        Self::with_clock(ttl, max_capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, max_capacity: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            // moka's own TTL only bounds memory; freshness is decided against `clock`.
            entries: moka::future::Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    /// Cached content for `url`, if stored less than one TTL ago.
    pub async fn get(&self, url: &str) -> Option<String> {
        let entry = self.entries.get(url).await?;
        let age = self.clock.now().signed_duration_since(entry.stored_at);
        if age < self.ttl {
            debug!("content cache hit for {} (age {}s)", url, age.num_seconds());
            return Some(entry.content);
        }

        debug!("content cache entry for {} expired (age {}s)", url, age.num_seconds());
        self.entries.invalidate(url).await;
        None
    }

    pub async fn put(&self, url: &str, content: String) {
        let entry = CacheEntry {
            url: url.to_string(),
            content,
            stored_at: self.clock.now(),
        };
        self.entries.insert(url.to_string(), entry).await;
    }

    /// Raw entry lookup without the freshness check.
    pub async fn entry(&self, url: &str) -> Option<CacheEntry> {
        self.entries.get(url).await
    }
}
