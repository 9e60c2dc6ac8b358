//! Decision cache
//!
//! A TTL memo in front of [`evaluator::has_permission`]. The cache is a pure
//! performance optimization: `get` is observably equivalent to calling the
//! evaluator directly, modulo timing. Expired entries are dropped lazily on
//! read and by [`DecisionCache::purge_expired`] sweeps instead of per-entry
//! timers.

use super::evaluator;
use crate::config::CacheConfig;
use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::debug;

/// Cache key: the permission set content (in the order given) plus the
/// requested permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DecisionKey {
    /// Hash of the permission set content
    set_hash: u64,
    /// Requested permission
    permission: Arc<str>,
}

impl DecisionKey {
    fn new(set: &[String], required: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        for permission in set {
            permission.hash(&mut hasher);
        }
        Self {
            set_hash: hasher.finish(),
            permission: Arc::from(required),
        }
    }
}

/// Cached decision with its expiry.
#[derive(Debug, Clone)]
struct DecisionEntry {
    value: bool,
    expires_at: Instant,
}

impl DecisionEntry {
    fn new(value: bool, config: &CacheConfig) -> Self {
        Self {
            value,
            expires_at: Instant::now() + config.ttl(),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// Atomic cache counters for lock-free updates on the check path.
#[derive(Debug, Default)]
struct AtomicDecisionStats {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    evaluations: AtomicU64,
}

/// Cache statistics snapshot (returned to callers).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecisionCacheStats {
    /// Live entries served without recomputation
    pub hits: u64,
    /// Lookups that required evaluation
    pub misses: u64,
    /// Entries removed by expiry sweeps
    pub evictions: u64,
    /// Calls into the underlying evaluator
    pub evaluations: u64,
}

impl DecisionCacheStats {
    /// Fraction of lookups served from cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Memoizing layer in front of the permission evaluator.
///
/// Constructor-injected rather than process-global; the convention is one
/// instance per process, owned by the engine. Must be [`clear`]ed whenever
/// the session, role, or permission set changes, so a stale entry can never
/// grant or deny based on a previous user's permissions.
///
/// [`clear`]: DecisionCache::clear
#[derive(Debug)]
pub struct DecisionCache {
    entries: DashMap<DecisionKey, DecisionEntry>,
    config: CacheConfig,
    stats: AtomicDecisionStats,
}

impl DecisionCache {
    /// Create a new decision cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            config,
            stats: AtomicDecisionStats::default(),
        }
    }

    /// Check a permission, serving from cache when a live entry exists.
    ///
    /// Always returns exactly what [`evaluator::has_permission`] would
    /// return for the same inputs.
    pub fn get(&self, set: &[String], required: &str) -> bool {
        if !self.config.enabled {
            self.stats.evaluations.fetch_add(1, Ordering::Relaxed);
            return evaluator::has_permission(set, required);
        }

        let key = DecisionKey::new(set, required);
        if let Some(entry) = self.entries.get(&key) {
            if !entry.is_expired() {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(permission = required, "decision cache hit");
                return entry.value;
            }
        }

        if self.entries.len() >= self.config.max_entries {
            self.purge_expired();
        }

        let value = evaluator::has_permission(set, required);
        self.stats.evaluations.fetch_add(1, Ordering::Relaxed);
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key, DecisionEntry::new(value, &self.config));
        value
    }

    /// Drop all entries immediately.
    ///
    /// Invoked on logout, role change, and permission-set change.
    pub fn clear(&self) {
        self.entries.clear();
        debug!("decision cache cleared");
    }

    /// Remove expired entries.
    pub fn purge_expired(&self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            self.stats.evictions.fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, "purged expired decisions");
        }
    }

    /// Number of entries currently stored, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the cache counters.
    pub fn stats(&self) -> DecisionCacheStats {
        DecisionCacheStats {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            evaluations: self.stats.evaluations.load(Ordering::Relaxed),
        }
    }
}
