//! Bounded, expiring robots.txt cache with per-key load coalescing.
//!
//! This module provides `RobotsCache` which handles:
//! - Bounded storage of parsed documents keyed by robots.txt URL
//! - Write-based expiry: an entry is stale a fixed time after it was loaded
//! - Single-flight loads: concurrent misses on one key share one load
//! - Only successful loads are stored; failures are handed to every waiter
//!   of that load and then forgotten

use ahash::AHashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use quick_cache::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

use crate::{Error, Result, Robots};

/// Outcome of one load, shared by every caller that waited on it.
type LoadOutcome = std::result::Result<Arc<Robots>, Arc<Error>>;

/// Slot filled exactly once by the caller that performs the load.
type LoadSlot = Arc<OnceCell<LoadOutcome>>;

/// Cached document with its load time.
#[derive(Clone)]
struct CachedRobots {
    robots: Arc<Robots>,
    loaded_at: Instant,
}

/// Thread-safe robots.txt cache.
///
/// # Example
///
/// ```
/// use robots_exclusion::service::RobotsCache;
/// use std::time::Duration;
/// use url::Url;
///
/// let cache = RobotsCache::new(100, Duration::from_secs(3600));
/// let key = Url::parse("http://example.com/robots.txt").unwrap();
///
/// let robots = cache
///     .get_or_load(&key, |_| "user-agent: *\ndisallow: /\n".parse())
///     .unwrap();
/// assert_eq!(robots.groups().len(), 1);
/// assert_eq!(cache.len(), 1);
/// ```
pub struct RobotsCache {
    entries: Cache<Url, CachedRobots>,
    /// Loads currently running, by key
    in_flight: Mutex<AHashMap<Url, LoadSlot>>,
    capacity: usize,
    time_to_live: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    loads: AtomicU64,
    load_failures: AtomicU64,
}

impl RobotsCache {
    /// Create a cache holding at most `capacity` documents, each for
    /// `time_to_live` after it was loaded.
    pub fn new(capacity: usize, time_to_live: Duration) -> Self {
        Self {
            entries: Cache::new(capacity),
            in_flight: Mutex::new(AHashMap::new()),
            capacity,
            time_to_live,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            loads: AtomicU64::new(0),
            load_failures: AtomicU64::new(0),
        }
    }

    /// Get the document for `key`, running `load` on a miss.
    ///
    /// At most one load per key runs at a time. Callers arriving while a load
    /// is running block until it finishes and receive its result; a failure
    /// comes back as [`Error::Shared`] and is not cached.
    pub fn get_or_load<F>(&self, key: &Url, load: F) -> Result<Arc<Robots>>
    where
        F: FnOnce(&Url) -> Result<Robots>,
    {
        if let Some(robots) = self.get_fresh(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(robots);
        }

        let slot = {
            let mut in_flight = self.in_flight.lock();

            // A load may have finished between the first lookup and the lock.
            // Loads publish under this lock, so an expired entry seen here is
            // safe to drop.
            match self.entries.get(key) {
                Some(entry) if self.is_fresh(&entry) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(entry.robots);
                }
                Some(_) => {
                    log::debug!("Cache entry expired: {}", key);
                    self.entries.remove(key);
                }
                None => {}
            }
            self.misses.fetch_add(1, Ordering::Relaxed);

            Arc::clone(
                in_flight
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let outcome = slot.get_or_init(|| self.run_load(key, load));
        outcome.clone().map_err(Error::Shared)
    }

    /// Run a load, publish its result and retire the in-flight slot.
    fn run_load<F>(&self, key: &Url, load: F) -> LoadOutcome
    where
        F: FnOnce(&Url) -> Result<Robots>,
    {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let outcome = load(key).map(Arc::new).map_err(Arc::new);

        let mut in_flight = self.in_flight.lock();
        match &outcome {
            Ok(robots) => {
                self.entries.insert(
                    key.clone(),
                    CachedRobots {
                        robots: Arc::clone(robots),
                        loaded_at: Instant::now(),
                    },
                );
            }
            Err(e) => {
                self.load_failures.fetch_add(1, Ordering::Relaxed);
                log::debug!("Load failed for {}: {}", key, e);
            }
        }
        in_flight.remove(key);

        outcome
    }

    /// Look up an unexpired entry. Expired entries are left in place.
    fn get_fresh(&self, key: &Url) -> Option<Arc<Robots>> {
        self.entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.robots)
    }

    fn is_fresh(&self, entry: &CachedRobots) -> bool {
        entry.loaded_at.elapsed() < self.time_to_live
    }

    /// Drop every cached document.
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    /// Number of cached documents, including expired ones not yet dropped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            capacity: self.capacity,
            len: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            load_failures: self.load_failures.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum cache capacity.
    pub capacity: usize,
    /// Current number of entries in the cache.
    pub len: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that missed the cache.
    pub misses: u64,
    /// Loads performed.
    pub loads: u64,
    /// Loads that failed.
    pub load_failures: u64,
}
