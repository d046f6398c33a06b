//! Bounded, time-limited answer cache.

use docqa_core::CacheSettings;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of cache usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// Answer cache shared by concurrent QA requests.
///
/// Entries expire a fixed time after they are written and the least recently
/// used entries are evicted once the size bound is reached. Eviction runs
/// inside the cache; callers never schedule it.
///
/// Eviction order follows reads as well as writes: a frequently asked answer
/// survives longer than one written later but never read. Expiry still counts
/// from the write alone.
pub struct AnswerCache {
    inner: Cache<String, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AnswerCache {
    pub fn new(settings: CacheSettings) -> Self {
        let inner = Cache::builder()
            .max_capacity(settings.max_entries)
            .time_to_live(settings.ttl())
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self {
            inner,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let found = self.inner.get(key);

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }

        found
    }

    /// Store an answer. A concurrent insert for the same key wins if it lands last.
    pub fn insert(&self, key: String, answer: String) {
        self.inner.insert(key, answer);
    }

    /// Drop every cached answer.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
        tracing::info!("Answer cache invalidated");
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.inner.entry_count(),
        }
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}
