//! Poisoned-lock recovery for the in-memory store.
//!
//! A panic while holding the entries lock poisons it. Cache contents are
//! disposable, so the guard is recovered instead of propagating the panic;
//! the worst case is one stale entry that the next eviction removes.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

pub(crate) fn read_entries<'a, T>(lock: &'a RwLock<T>, op: &'static str) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        warn!(op, "cache entries lock poisoned during read; recovering");
        poisoned.into_inner()
    })
}

pub(crate) fn write_entries<'a, T>(
    lock: &'a RwLock<T>,
    op: &'static str,
) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        warn!(op, "cache entries lock poisoned during write; recovering");
        poisoned.into_inner()
    })
}
