use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

/// LRU + TTL cache for pipeline responses. Keys are content hashes of the
/// normalized query and result limit, so two phrasings that normalize the
/// same way share an entry.
pub struct ResultCache<T> {
    cache: Mutex<LruCache<String, (T, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl<T> ResultCache<T> {
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let mut cache = self.cache.lock();
        if let Some((value, timestamp)) = cache.get(key) {
            if timestamp.elapsed() < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value.clone())
            } else {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn set(&self, key: &str, value: T) {
        let mut cache = self.cache.lock();
        cache.put(key.to_string(), (value, Instant::now()));
    }

    pub fn make_key(normalized_query: &str, result_limit: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalized_query.as_bytes());
        hasher.update(result_limit.to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        let cache = self.cache.lock();

        CacheStats {
            hits,
            misses,
            size: cache.len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let cache: ResultCache<String> = ResultCache::new(10, 60);
        let key = ResultCache::<String>::make_key("red shoes", 3);

        assert!(cache.get(&key).is_none());
        cache.set(&key, "result".to_string());
        assert_eq!(cache.get(&key), Some("result".to_string()));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache: ResultCache<u32> = ResultCache::new(10, 0);
        let key = ResultCache::<u32>::make_key("red shoes", 3);
        cache.set(&key, 7);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_key_depends_on_limit() {
        let a = ResultCache::<u32>::make_key("red shoes", 3);
        let b = ResultCache::<u32>::make_key("red shoes", 5);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_resets_counters() {
        let cache: ResultCache<u32> = ResultCache::new(10, 60);
        let key = ResultCache::<u32>::make_key("q", 3);
        cache.set(&key, 1);
        let _ = cache.get(&key);
        cache.clear();
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.size, 0);
    }
}
