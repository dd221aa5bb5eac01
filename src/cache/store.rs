//! Cache store interface and in-process implementation.
//!
//! The store is an injected dependency rather than ambient global state: it
//! holds opaque JSON values under rendered key strings and supports the five
//! operations the invalidation layer needs. Entries have no expiry by default
//! and live until explicitly evicted; a TTL can be set per entry when a
//! caller opts in.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;

use super::keys::{CacheKey, KeyPattern};
use super::lock::{read_entries, write_entries};

#[derive(Debug, Error)]
pub enum CacheStoreError {
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
    #[error("cache store operation failed: {0}")]
    Operation(String),
}

/// Key-value interface the catalog caches against.
///
/// Implementations must provide atomic per-key get/set/delete; no per-key
/// locking or CAS is assumed. Concurrent writers racing to populate the same
/// key may both set it; last write wins, and both computations derive from
/// the same source of truth.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheStoreError>;

    fn set(
        &self,
        key: &CacheKey,
        value: Value,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError>;

    fn delete(&self, key: &CacheKey) -> Result<(), CacheStoreError>;

    fn delete_many(&self, keys: &[CacheKey]) -> Result<(), CacheStoreError>;

    /// Evict every key matching the pattern's prefix.
    fn delete_matching(&self, pattern: &KeyPattern) -> Result<(), CacheStoreError>;
}

struct StoredEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// In-process cache store backed by a `HashMap`.
///
/// Expiry is lazy: entries past their deadline are dropped on the next read.
/// The store is disposable; it can be discarded and rebuilt from the
/// relational source of truth at any time.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live entries, counting not-yet-collected expired ones.
    pub fn len(&self) -> usize {
        read_entries(&self.entries, "len").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        write_entries(&self.entries, "clear").clear();
    }

    /// Whether a key currently holds a live value. Test and introspection
    /// helper; the read path goes through [`CacheStore::get`].
    pub fn contains(&self, key: &CacheKey) -> bool {
        let rendered = key.render();
        let now = Instant::now();
        read_entries(&self.entries, "contains")
            .get(&rendered)
            .is_some_and(|entry| !entry.is_expired(now))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &CacheKey) -> Result<Option<Value>, CacheStoreError> {
        let rendered = key.render();
        let now = Instant::now();

        {
            let entries = read_entries(&self.entries, "get");
            match entries.get(&rendered) {
                Some(entry) if !entry.is_expired(now) => {
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Lazily collect the expired entry. The expiry check runs again under
        // the write guard: a concurrent `set` may have replaced the entry
        // after the read guard dropped, and a fresh value must not be removed.
        let mut entries = write_entries(&self.entries, "get.expire");
        if entries
            .get(&rendered)
            .is_some_and(|entry| entry.is_expired(Instant::now()))
        {
            entries.remove(&rendered);
        }
        Ok(None)
    }

    fn set(
        &self,
        key: &CacheKey,
        value: Value,
        ttl: Option<Duration>,
    ) -> Result<(), CacheStoreError> {
        let entry = StoredEntry {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        write_entries(&self.entries, "set").insert(key.render(), entry);
        Ok(())
    }

    fn delete(&self, key: &CacheKey) -> Result<(), CacheStoreError> {
        write_entries(&self.entries, "delete").remove(&key.render());
        Ok(())
    }

    fn delete_many(&self, keys: &[CacheKey]) -> Result<(), CacheStoreError> {
        let mut entries = write_entries(&self.entries, "delete_many");
        for key in keys {
            entries.remove(&key.render());
        }
        Ok(())
    }

    fn delete_matching(&self, pattern: &KeyPattern) -> Result<(), CacheStoreError> {
        write_entries(&self.entries, "delete_matching")
            .retain(|key, _| !pattern.matches(key));
        Ok(())
    }
}
