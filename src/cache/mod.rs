//! Aggregation result cache.
//!
//! Stores whole merged-and-scored result sets keyed by search. Capacity is
//! moka's problem; freshness is ours: entries carry their creation time and
//! are checked lazily on read against an injected clock, so tests never
//! sleep.

pub mod clock;

pub use clock::{Clock, SystemClock};

#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::model::Posting;

/// Cache key: blake3 of `(title, location, skills)`.
pub type SearchKey = [u8; 32];

/// Response header reporting whether a search was served from cache.
pub const CACHE_STATUS_HEADER: &str = "X-Jobmesh-Cache";

/// How a search request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// One immutable cached snapshot.
#[derive(Clone)]
pub struct CacheEntry {
    pub postings: Arc<Vec<Posting>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// TTL cache over merged search results.
///
/// Writes replace whole entries; concurrent same-key writers race benignly
/// (last writer wins, both snapshots are valid).
pub struct SearchCache {
    entries: Cache<SearchKey, CacheEntry>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
}

impl SearchCache {
    pub fn new(capacity: u64, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::new(capacity),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(24)),
            clock,
        }
    }

    /// Returns the cached snapshot for `key` if present and fresh.
    ///
    /// Expired entries are removed on the spot.
    pub fn get(&self, key: &SearchKey) -> Option<Arc<Vec<Posting>>> {
        let entry = self.entries.get(key)?;

        let age = self.clock.now() - entry.created_at;
        if age > self.ttl {
            debug!("cache entry expired, evicting");
            self.entries.invalidate(key);
            return None;
        }

        Some(entry.postings)
    }

    /// Stores a snapshot, replacing any previous entry for `key`.
    pub fn put(&self, key: SearchKey, postings: Vec<Posting>) {
        self.entries.insert(
            key,
            CacheEntry {
                postings: Arc::new(postings),
                created_at: self.clock.now(),
            },
        );
    }

    /// Drops the entry for `key`, if any.
    pub fn invalidate(&self, key: &SearchKey) {
        self.entries.invalidate(key);
    }

    /// Approximate entry count (moka maintains counts asynchronously).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing;
    use crate::model::{ApplySource, Platform};

    fn posting(n: usize) -> Posting {
        Posting {
            id: format!("id-{n}"),
            title: format!("Job {n}"),
            company: "Acme".to_string(),
            location: "Melbourne".to_string(),
            description: None,
            full_description: None,
            requirements: vec![],
            benefits: vec![],
            tags: vec![],
            salary: None,
            job_type: None,
            posted_date: None,
            platform: Platform::Seek,
            url: "https://example.com".to_string(),
            source: ApplySource::Platform,
            summary: None,
            detailed_summary: None,
            match_score: None,
            match_analysis: None,
            match_highlights: vec![],
        }
    }

    fn key(title: &str) -> SearchKey {
        hashing::search_key(title, "Melbourne", &[])
    }

    #[test]
    fn test_put_get_round_trip() {
        let cache = SearchCache::new(100, Duration::from_secs(60), Arc::new(SystemClock));
        let key = key("Engineer");

        assert!(cache.get(&key).is_none());

        cache.put(key, vec![posting(1), posting(2)]);
        let snapshot = cache.get(&key).expect("fresh entry");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_lazy_ttl_expiry() {
        let clock = Arc::new(ManualClock::default());
        let cache = SearchCache::new(100, Duration::from_secs(60), clock.clone());
        let key = key("Engineer");

        cache.put(key, vec![posting(1)]);
        assert!(cache.get(&key).is_some());

        clock.advance(chrono::Duration::seconds(61));
        assert!(cache.get(&key).is_none());
        // And the stale entry is gone for good.
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_entry_at_exact_ttl_is_still_fresh() {
        let clock = Arc::new(ManualClock::default());
        let cache = SearchCache::new(100, Duration::from_secs(60), clock.clone());
        let key = key("Engineer");

        cache.put(key, vec![posting(1)]);
        clock.advance(chrono::Duration::seconds(60));
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_invalidate_removes_entry() {
        let cache = SearchCache::new(100, Duration::from_secs(60), Arc::new(SystemClock));
        let key = key("Engineer");

        cache.put(key, vec![posting(1)]);
        cache.invalidate(&key);
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_put_replaces_whole_entry() {
        let cache = SearchCache::new(100, Duration::from_secs(60), Arc::new(SystemClock));
        let key = key("Engineer");

        cache.put(key, vec![posting(1), posting(2)]);
        cache.put(key, vec![posting(3)]);

        let snapshot = cache.get(&key).expect("fresh entry");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "id-3");
    }

    #[test]
    fn test_distinct_keys_do_not_collide() {
        let cache = SearchCache::new(100, Duration::from_secs(60), Arc::new(SystemClock));

        cache.put(key("Engineer"), vec![posting(1)]);
        cache.put(key("Accountant"), vec![posting(2)]);

        assert_eq!(cache.get(&key("Engineer")).expect("entry")[0].id, "id-1");
        assert_eq!(cache.get(&key("Accountant")).expect("entry")[0].id, "id-2");
    }
}
