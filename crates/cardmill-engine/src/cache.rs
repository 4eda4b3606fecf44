//! TTL-bounded holder for the active rule set.
//!
//! Readers always get a whole `Arc<RuleSet>` — a refresh swaps the object
//! reference, so concurrent readers see either the old or the new rule
//! set, never a blend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use cardmill_core::RuleSet;

/// Default refresh window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheInner {
    value: Arc<RuleSet>,
    last_refreshed: Instant,
    ttl: Duration,
    invalidated: bool,
}

/// Thread-safe rule-set cache with a time-to-live window.
pub struct RulesCache {
    inner: Mutex<CacheInner>,
}

impl RulesCache {
    pub fn new(rules: RuleSet, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                value: Arc::new(rules),
                last_refreshed: Instant::now(),
                ttl,
                invalidated: false,
            }),
        }
    }

    /// Cache seeded with the compiled-in defaults and the default TTL.
    pub fn default_cache() -> Self {
        Self::new(RuleSet::default_rules(), DEFAULT_TTL)
    }

    /// Current rule set. Staleness does not block reads — callers check
    /// [`is_stale`](Self::is_stale) to decide when to re-fetch and
    /// [`store`](Self::store) the replacement.
    pub fn get(&self) -> Arc<RuleSet> {
        self.inner.lock().value.clone()
    }

    /// Whether the TTL has elapsed or the cache was explicitly invalidated.
    pub fn is_stale(&self) -> bool {
        let inner = self.inner.lock();
        inner.invalidated || inner.last_refreshed.elapsed() >= inner.ttl
    }

    /// Replace the rule set wholesale. The stored copy gets a version one
    /// past the previous one. Returns the new version.
    pub fn store(&self, mut rules: RuleSet) -> u32 {
        let mut inner = self.inner.lock();
        rules.version = inner.value.version + 1;
        let version = rules.version;
        inner.value = Arc::new(rules);
        inner.last_refreshed = Instant::now();
        inner.invalidated = false;
        version
    }

    /// Force the next [`is_stale`](Self::is_stale) to report true.
    pub fn invalidate(&self) {
        self.inner.lock().invalidated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_seeded_rules() {
        let cache = RulesCache::default_cache();
        assert_eq!(cache.get().version, 1);
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_store_bumps_version() {
        let cache = RulesCache::default_cache();
        let v2 = cache.store(RuleSet::default_rules());
        assert_eq!(v2, 2);
        assert_eq!(cache.get().version, 2);
        assert_eq!(cache.store(RuleSet::default_rules()), 3);
    }

    #[test]
    fn test_invalidate_forces_stale() {
        let cache = RulesCache::default_cache();
        assert!(!cache.is_stale());
        cache.invalidate();
        assert!(cache.is_stale());
        // A store clears the invalidation.
        cache.store(RuleSet::default_rules());
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = RulesCache::new(RuleSet::default_rules(), Duration::from_millis(0));
        assert!(cache.is_stale());
    }

    #[test]
    fn test_readers_keep_old_arc_across_store() {
        let cache = RulesCache::default_cache();
        let before = cache.get();
        cache.store(RuleSet::default_rules());
        // The old reference is still whole and readable.
        assert_eq!(before.version, 1);
        assert_eq!(cache.get().version, 2);
    }
}
