//! Cache Entry Module
//!
//! Defines a cached user snapshot with its refresh time.

use std::time::{Duration, Instant};

use crate::models::User;

// == Cache Entry ==
/// A user snapshot plus the instant it was last inserted or refreshed.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored snapshot
    pub user: User,
    /// Last insert/refresh time
    pub stored_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(user: User) -> Self {
        Self {
            user,
            stored_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}
