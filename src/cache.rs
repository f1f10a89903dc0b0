//! Keyed in-memory cache for API reads.
//!
//! Entries are keyed by entity type plus query parameters and served only
//! within a bounded staleness window. Writers follow one of two protocols:
//! plain invalidation after a mutation, or the optimistic
//! snapshot/mutate/restore sequence used by the admin inquiry delete. The
//! snapshot taken by [`QueryCache::snapshot`] belongs to a single mutation
//! call, so overlapping deletes roll back independently.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::domain::category::ProductCategory;
use crate::domain::inquiry::Inquiry;
use crate::domain::product::Product;

/// How long a cached read stays fresh.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Cache key: entity type plus the query parameters that produced the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Product listing, keyed by the normalized query string.
    Products(String),
    /// Single product by id.
    Product(String),
    /// The category list (no parameters).
    Categories,
    /// The admin inquiry list (no parameters).
    Inquiries,
    /// Single inquiry by id.
    Inquiry(String),
}

/// A cached payload. Typed per entity so no caller ever deserializes twice.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Products(Vec<Product>),
    Product(Product),
    Categories(Vec<ProductCategory>),
    Inquiries(Vec<Inquiry>),
    Inquiry(Inquiry),
}

/// A value plus its freshness bookkeeping. Opaque outside this module so
/// rollback can only restore what [`QueryCache::snapshot`] handed out.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: CachedValue,
    stored_at: Instant,
    stale: bool,
}

pub struct QueryCache {
    stale_after: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl QueryCache {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            stale_after,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached value if it is still fresh: stored within the
    /// staleness window and not explicitly invalidated.
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let entries = self.read();
        let entry = entries.get(key)?;
        if entry.stale || entry.stored_at.elapsed() > self.stale_after {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Returns the cached value regardless of freshness. Optimistic
    /// mutations read through this so they can edit whatever the UI last
    /// saw.
    pub fn peek(&self, key: &CacheKey) -> Option<CachedValue> {
        self.read().get(key).map(|entry| entry.value.clone())
    }

    /// Stores a freshly fetched value.
    pub fn put(&self, key: CacheKey, value: CachedValue) {
        self.write().insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
                stale: false,
            },
        );
    }

    /// Marks an entry stale without dropping its value, so the next read
    /// refetches while rollback snapshots stay restorable.
    pub fn invalidate(&self, key: &CacheKey) {
        if let Some(entry) = self.write().get_mut(key) {
            entry.stale = true;
        }
    }

    /// Drops an entry entirely.
    pub fn remove(&self, key: &CacheKey) {
        self.write().remove(key);
    }

    /// Captures the current entry for a key, bookkeeping included. Pair
    /// with [`restore`](Self::restore) to roll back an optimistic mutation
    /// verbatim.
    pub fn snapshot(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.read().get(key).cloned()
    }

    /// Reinstates a snapshot taken before an optimistic mutation.
    pub fn restore(&self, key: CacheKey, entry: CacheEntry) {
        self.write().insert(key, entry);
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_AFTER)
    }
}
