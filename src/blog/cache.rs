//! Bounded response cache with time-based expiry.

use std::num::NonZeroUsize;

use lru::LruCache;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub data: V,
    pub stored_at: f64,
}

/// LRU-bounded map from request URL to data; entries expire `ttl_ms`
/// after being stored.
pub struct TtlCache<V> {
    entries: LruCache<String, CacheEntry<V>>,
    ttl_ms: f64,
}

impl<V> TtlCache<V> {
    pub fn new(capacity: usize, ttl_ms: f64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl_ms,
        }
    }

    /// Fresh data for `key`. A stale entry is evicted on lookup.
    pub fn get(&mut self, key: &str, now_ms: f64) -> Option<&V> {
        let fresh = now_ms - self.entries.peek(key)?.stored_at < self.ttl_ms;
        if !fresh {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.data)
    }

    pub fn insert(&mut self, key: &str, data: V, now_ms: f64) {
        self.entries.put(key.to_string(), CacheEntry { data, stored_at: now_ms });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
