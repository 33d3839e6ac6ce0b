use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: String,
    pub timestamp: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}

/// Response bodies keyed by request, valid for `ttl` after they were stored.
///
/// Capacity is bounded: inserting sweeps expired entries first, then evicts
/// the oldest entry if the map is still full.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }
}

impl ResponseCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_at(key, Instant::now())
    }

    /// Looks `key` up as of `now`. Stale entries read as absent.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<&str> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.data.as_str())
    }

    pub fn insert(&mut self, key: String, data: String) {
        self.insert_at(key, data, Instant::now());
    }

    pub fn insert_at(&mut self, key: String, data: String, now: Instant) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.sweep(now);
            if self.entries.len() >= self.capacity {
                self.evict_oldest();
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                data,
                timestamp: now,
            },
        );
    }

    /// Drops every entry that has outlived the TTL. Returns how many went.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(now, ttl));
        let removed = before - self.entries.len();
        if removed > 0 {
            log::debug!("[CACHE] swept {} expired entries", removed);
        }
        removed
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.timestamp)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            log::debug!("[CACHE] capacity reached, evicting {}", key);
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_expires_after_ttl() {
        let mut cache = ResponseCache::default();
        let t0 = Instant::now();
        cache.insert_at("k".into(), "{\"a\":1}".into(), t0);

        let just_before = t0 + Duration::from_secs(5 * 60 - 1);
        assert_eq!(cache.get_at("k", just_before), Some("{\"a\":1}"));

        let after = t0 + Duration::from_secs(5 * 60 + 1);
        assert_eq!(cache.get_at("k", after), None);
    }

    #[test]
    fn overwrite_refreshes_timestamp() {
        let mut cache = ResponseCache::default();
        let t0 = Instant::now();
        cache.insert_at("k".into(), "old".into(), t0);
        let t1 = t0 + Duration::from_secs(200);
        cache.insert_at("k".into(), "new".into(), t1);

        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(400)), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn full_cache_prefers_sweeping_stale_entries() {
        let mut cache = ResponseCache::new(Duration::from_secs(10), 2);
        let t0 = Instant::now();
        cache.insert_at("stale".into(), "1".into(), t0);
        cache.insert_at("fresh".into(), "2".into(), t0 + Duration::from_secs(8));

        let later = t0 + Duration::from_secs(12);
        cache.insert_at("new".into(), "3".into(), later);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_at("fresh", later), Some("2"));
        assert_eq!(cache.get_at("new", later), Some("3"));
    }

    #[test]
    fn full_cache_evicts_oldest_live_entry() {
        let mut cache = ResponseCache::new(Duration::from_secs(60), 2);
        let t0 = Instant::now();
        cache.insert_at("a".into(), "1".into(), t0);
        cache.insert_at("b".into(), "2".into(), t0 + Duration::from_secs(1));
        cache.insert_at("c".into(), "3".into(), t0 + Duration::from_secs(2));

        let now = t0 + Duration::from_secs(3);
        assert_eq!(cache.get_at("a", now), None);
        assert_eq!(cache.get_at("b", now), Some("2"));
        assert_eq!(cache.get_at("c", now), Some("3"));
    }
}
