//! In-memory TTL cache for provider responses.
//!
//! Constructor-injected and instance-scoped -- no process-wide singleton.
//! Entries expire lazily on read; [`ResponseCache::sweep`] exists for the
//! periodic pass. The cache is a performance optimization only and is
//! never consulted for mutation ordering.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Default entry lifetime: 60 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct CacheEntry {
    value: serde_json::Value,
    stored_at: Instant,
}

/// Keyed, TTL-bounded response cache.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    enabled: bool,
}

impl ResponseCache {
    /// Cache with the default 60-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            enabled: true,
        }
    }

    /// No-op cache: every read misses, every write is discarded.
    pub fn disabled() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::ZERO,
            enabled: false,
        }
    }

    /// Build a cache key from provider, endpoint, and query params.
    ///
    /// Params are sorted so the key is order-independent.
    pub fn make_key(provider: &str, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut sorted: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        sorted.sort();
        format!("{provider}:{endpoint}?{}", sorted.join("&"))
    }

    /// Fetch a live entry, expiring it lazily if the TTL has passed.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        if !self.enabled {
            return None;
        }
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a response.
    pub fn put(&self, key: String, value: serde_json::Value) {
        if !self.enabled {
            return;
        }
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry. Returns the number removed.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        before - entries.len()
    }

    /// Drop everything, regardless of age.
    pub fn invalidate_all(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }

    /// Current entry count, including not-yet-swept expired entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn value(n: i32) -> serde_json::Value {
        serde_json::json!({ "n": n })
    }

    // -- keys -----------------------------------------------------------------

    #[test]
    fn key_is_param_order_independent() {
        let a = ResponseCache::make_key(
            "api-football",
            "fixtures",
            &[("league", "39".into()), ("season", "2026".into())],
        );
        let b = ResponseCache::make_key(
            "api-football",
            "fixtures",
            &[("season", "2026".into()), ("league", "39".into())],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn key_distinguishes_endpoint_and_provider() {
        let params = [("season", "2026".to_string())];
        let a = ResponseCache::make_key("api-football", "fixtures", &params);
        let b = ResponseCache::make_key("api-football", "teams", &params);
        let c = ResponseCache::make_key("mock", "fixtures", &params);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    // -- TTL ------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl() {
        let cache = ResponseCache::with_ttl(Duration::from_secs(60));
        cache.put("k".into(), value(1));
        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k"), Some(value(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn expires_lazily_on_read() {
        let cache = ResponseCache::with_ttl(Duration::from_secs(60));
        cache.put("k".into(), value(1));
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("k"), None);
        // lazy expiry removed the entry
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_removes_only_expired() {
        let cache = ResponseCache::with_ttl(Duration::from_secs(60));
        cache.put("old".into(), value(1));
        tokio::time::advance(Duration::from_secs(40)).await;
        cache.put("fresh".into(), value(2));
        tokio::time::advance(Duration::from_secs(30)).await;

        let removed = cache.sweep();
        assert_eq!(removed, 1);
        assert_eq!(cache.get("fresh"), Some(value(2)));
        assert_eq!(cache.get("old"), None);
    }

    // -- disabled -------------------------------------------------------------

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let cache = ResponseCache::disabled();
        cache.put("k".into(), value(1));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    // -- invalidation ---------------------------------------------------------

    #[tokio::test]
    async fn invalidate_all_clears() {
        let cache = ResponseCache::with_ttl(Duration::from_secs(60));
        cache.put("a".into(), value(1));
        cache.put("b".into(), value(2));
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
