use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde_json::Value;
use tokio::task::AbortHandle;
use tracing::debug;

/// Default time-to-live for cached responses: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<V> {
    value: V,
    /// Identifies this particular insertion of the key, so an expiry timer
    /// only ever removes the entry it was scheduled for.
    generation: u64,
    expiry: AbortHandle,
}

struct CacheInner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    next_generation: u64,
}

/// Process-wide response cache keyed by request locator.
///
/// Clone is cheap; clones share the same map. An entry present in the map is
/// treated as fresh. Entries leave the map when their expiry timer fires or
/// when they are invalidated. There is no capacity bound and no in-flight
/// deduplication: two concurrent misses for one key both run their fetcher.
pub struct ResponseCache<V = Value> {
    inner: Arc<Mutex<CacheInner<V>>>,
}

impl<V> Clone for ResponseCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                next_generation: 0,
            })),
        }
    }
}

impl<V> std::fmt::Debug for ResponseCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.len())
            .finish()
    }
}

fn lock<V>(inner: &Mutex<CacheInner<V>>) -> MutexGuard<'_, CacheInner<V>> {
    // A panic while holding the lock cannot leave the map half-updated
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<V: Clone + Send + 'static> ResponseCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `fetcher` and cache its result.
    ///
    /// On a hit the fetcher is never called. On a miss the fetched value is
    /// stored and scheduled for removal after `ttl`. A failed fetch stores
    /// nothing, so the next call for the same key fetches again.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetcher: F,
        ttl: Duration,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, fetching");
        let value = fetcher().await?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Look up a cached value without fetching.
    pub fn get(&self, key: &str) -> Option<V> {
        lock(&self.inner).entries.get(key).map(|e| e.value.clone())
    }

    fn insert(&self, key: &str, value: V, ttl: Duration) {
        let mut inner = lock(&self.inner);
        let generation = inner.next_generation;
        inner.next_generation += 1;

        let expiry = spawn_expiry(Arc::downgrade(&self.inner), key.to_string(), generation, ttl);
        let entry = CacheEntry {
            value,
            generation,
            expiry,
        };

        if let Some(previous) = inner.entries.insert(key.to_string(), entry) {
            previous.expiry.abort();
        }
    }
}

impl<V> ResponseCache<V> {
    /// Remove one entry. Unknown keys are a no-op.
    pub fn invalidate(&self, key: &str) {
        let removed = lock(&self.inner).entries.remove(key);
        match removed {
            Some(entry) => {
                entry.expiry.abort();
                debug!(key, "Cache entry invalidated");
            }
            None => debug!(key, "Cache invalidation for key not in cache"),
        }
    }

    /// Remove every entry. Returns how many entries were dropped.
    pub fn invalidate_all(&self) -> usize {
        let drained: Vec<CacheEntry<V>> =
            lock(&self.inner).entries.drain().map(|(_, e)| e).collect();
        for entry in &drained {
            entry.expiry.abort();
        }
        debug!(count = drained.len(), "Cleared entire response cache");
        drained.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.inner).entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys currently cached, sorted for stable display.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.inner).entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn spawn_expiry<V: Send + 'static>(
    inner: Weak<Mutex<CacheInner<V>>>,
    key: String,
    generation: u64,
    ttl: Duration,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let mut inner = lock(&inner);
        if inner.entries.get(&key).map(|e| e.generation) == Some(generation) {
            inner.entries.remove(&key);
            debug!(key = %key, "Cache expired");
        }
    });
    handle.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(60);
    const KEY: &str = "https://api.example.com/api/employee/all";

    async fn fetch_counted(cache: &ResponseCache, calls: &AtomicUsize) -> Result<Value, String> {
        cache
            .get_or_fetch(
                KEY,
                || async {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(json!({ "fetch": n }))
                },
                TTL,
            )
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_within_ttl_is_a_hit() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        let first = fetch_counted(&cache, &calls).await.unwrap();
        tokio::time::sleep(TTL / 2).await;
        let second = fetch_counted(&cache, &calls).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        fetch_counted(&cache, &calls).await.unwrap();
        assert!(cache.contains(KEY));

        tokio::time::sleep(TTL + Duration::from_millis(1)).await;
        assert!(!cache.contains(KEY));

        let value = fetch_counted(&cache, &calls).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(value, json!({ "fetch": 2 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_refetch() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        fetch_counted(&cache, &calls).await.unwrap();
        cache.invalidate(KEY);
        fetch_counted(&cache, &calls).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_unknown_key_is_noop() {
        let cache: ResponseCache = ResponseCache::new();
        cache.invalidate("never-cached");
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_is_not_cached() {
        let cache: ResponseCache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        let result: Result<Value, String> = cache
            .get_or_fetch(
                KEY,
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("connection refused".to_string())
                },
                TTL,
            )
            .await;
        assert_eq!(result, Err("connection refused".to_string()));
        assert!(!cache.contains(KEY));

        fetch_counted(&cache, &calls).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.contains(KEY));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_all_empties_map() {
        let cache = ResponseCache::new();
        for key in ["a", "b", "c"] {
            cache
                .get_or_fetch(key, || async { Ok::<_, String>(json!(key)) }, TTL)
                .await
                .unwrap();
        }
        assert_eq!(cache.keys(), vec!["a", "b", "c"]);

        assert_eq!(cache.invalidate_all(), 3);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_evict_fresher_entry() {
        let cache = ResponseCache::new();
        let calls = AtomicUsize::new(0);

        // First entry would expire at t = TTL
        fetch_counted(&cache, &calls).await.unwrap();
        tokio::time::sleep(TTL / 2).await;

        // Re-fetched entry expires at t = 1.5 * TTL
        cache.invalidate(KEY);
        fetch_counted(&cache, &calls).await.unwrap();

        tokio::time::sleep(TTL / 2 + Duration::from_millis(1)).await;
        assert!(cache.contains(KEY), "fresh entry evicted by the old timer");
        assert_eq!(cache.get(KEY), Some(json!({ "fetch": 2 })));

        tokio::time::sleep(TTL / 2).await;
        assert!(!cache.contains(KEY));
    }
}
