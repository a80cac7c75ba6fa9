//! Cache Module
//!
//! Bounded in-memory user cache with TTL expiration and LRU eviction.

use std::sync::Arc;

use tokio::sync::RwLock;

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache handle shared between the service and background tasks.
///
/// Locks are held for single-key operations only, never across network I/O.
pub type SharedCache = Arc<RwLock<CacheStore>>;
