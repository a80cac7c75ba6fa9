//! Cache Store Module
//!
//! User cache combining HashMap storage with LRU tracking and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, LruTracker};
use crate::models::{User, UserId};

// == Cache Store ==
/// Bounded user cache with LRU eviction and a fixed per-entry TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Snapshots keyed by user id
    entries: HashMap<UserId, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker<UserId>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of an entry since its last insert/refresh
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
        }
    }

    // == Put ==
    /// Stores a user snapshot under its id.
    ///
    /// Replacing an existing id resets its age. Inserting a new id while at
    /// capacity first evicts the least recently used entry.
    pub fn put(&mut self, user: User) {
        if self.max_entries == 0 {
            return;
        }

        let id = user.id;
        if !self.entries.contains_key(&id) && self.entries.len() >= self.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(id, CacheEntry::new(user));
        self.lru.touch(id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the cached snapshot if present and not expired.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, id: UserId) -> Option<User> {
        let expired = match self.entries.get(&id) {
            Some(entry) => entry.is_expired(self.ttl),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove(id);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(id);
        self.entries.get(&id).map(|entry| entry.user.clone())
    }

    // == Cleanup Expired ==
    /// Physically removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let expired_ids: Vec<UserId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(id, _)| *id)
            .collect();

        for id in &expired_ids {
            self.remove(*id);
        }

        expired_ids.len()
    }

    fn remove(&mut self, id: UserId) {
        self.entries.remove(&id);
        self.lru.remove(&id);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(15);

    fn user(id: UserId, avatar: u32) -> User {
        User {
            avatar: Some(avatar),
            ..User::new(id)
        }
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new(100, TTL);

        store.put(user(1, 10));

        assert_eq!(store.get(1), Some(user(1, 10)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_never_inserted() {
        let mut store = CacheStore::new(100, TTL);
        assert!(store.get(404).is_none());
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new(100, TTL);

        store.put(user(1, 10));
        store.put(user(1, 20));

        assert_eq!(store.get(1).and_then(|u| u.avatar), Some(20));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100, Duration::from_millis(50));

        store.put(user(1, 10));
        assert!(store.get(1).is_some());

        sleep(Duration::from_millis(80));

        // Still physically present until read
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
        assert_eq!(store.len(), 0);

        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_store_overwrite_resets_age() {
        let mut store = CacheStore::new(100, Duration::from_millis(120));

        store.put(user(1, 10));
        sleep(Duration::from_millis(80));
        store.put(user(1, 11));
        sleep(Duration::from_millis(80));

        assert_eq!(store.get(1).and_then(|u| u.avatar), Some(11));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3, TTL);

        store.put(user(1, 0));
        store.put(user(2, 0));
        store.put(user(3, 0));

        // Cache is full, adding 4 should evict 1 (oldest)
        store.put(user(4, 0));

        assert_eq!(store.len(), 3);
        assert!(store.get(1).is_none());
        assert!(store.get(2).is_some());
        assert!(store.get(3).is_some());
        assert!(store.get(4).is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3, TTL);

        store.put(user(1, 0));
        store.put(user(2, 0));
        store.put(user(3, 0));

        // Access 1 to make it most recently used
        store.get(1);

        // Adding 4 should evict 2 (now oldest)
        store.put(user(4, 0));

        assert!(store.get(1).is_some());
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = CacheStore::new(2, TTL);

        store.put(user(1, 0));
        store.put(user(2, 0));
        store.put(user(1, 5));

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_zero_capacity_stores_nothing() {
        let mut store = CacheStore::new(0, TTL);

        store.put(user(1, 0));

        assert!(store.is_empty());
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100, TTL);

        store.put(user(1, 0));
        store.get(1); // hit
        store.get(2); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_remove_expired() {
        let mut store = CacheStore::new(100, Duration::from_millis(50));

        store.put(user(1, 0));
        sleep(Duration::from_millis(80));
        store.put(user(2, 0));

        let removed = store.remove_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(2).is_some());
    }
}
