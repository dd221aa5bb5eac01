//! Rasteh cache system.
//!
//! Read-through caching of catalog queries and objects with write-path
//! invalidation:
//!
//! - **Key schema** (`keys`): deterministic, collision-free key strings for
//!   collection and singleton views.
//! - **Store** (`store`): an injected key-value interface with an in-process
//!   implementation; entries live until explicitly evicted.
//! - **Accessor** (`accessor`): cache-or-compute lookups that never cache
//!   negative results and fail open when the store misbehaves.
//! - **Invalidation** (`invalidation`): per-entity write events merged into an
//!   eviction plan that covers every collection the entity appears in.

mod accessor;
mod config;
mod invalidation;
mod keys;
mod lock;
mod store;

pub use accessor::{
    CacheReader, METRIC_CACHE_HIT, METRIC_CACHE_MISS, METRIC_CACHE_STORE_ERROR,
};
pub use invalidation::METRIC_CACHE_EVICT;
pub use config::CacheConfig;
pub use invalidation::{EntityEvent, InvalidationPlan, Invalidator, ProductRef};
pub use keys::{CacheKey, KeyPattern, NO_BRAND_SEGMENT};
pub use store::{CacheStore, CacheStoreError, MemoryStore};
