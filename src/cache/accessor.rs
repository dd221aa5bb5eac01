//! Read-through cache accessor.
//!
//! Looks a key up in the store; on a miss, runs the fallback query, stores
//! the successful result, and returns it. Failed computations propagate to
//! the caller and are never cached, so a missing row never leaves a negative
//! entry behind. Store failures degrade to the live query (fail-open) and are
//! surfaced through logs and an error counter rather than the response.

use std::future::Future;
use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::store::CacheStore;

pub const METRIC_CACHE_HIT: &str = "rasteh_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "rasteh_cache_miss_total";
pub const METRIC_CACHE_STORE_ERROR: &str = "rasteh_cache_store_error_total";

/// Read-side cache handle shared by all services.
#[derive(Clone)]
pub struct CacheReader {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl CacheReader {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Serve a collection view from cache, computing and storing it on a miss.
    ///
    /// Two calls with no intervening write hit the store on the second call;
    /// the compute closure runs at most once in that window.
    pub async fn get_or_compute_collection<T, F, Fut, E>(
        &self,
        key: &CacheKey,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute(key, compute).await
    }

    /// Serve a singleton view from cache, computing and storing it on a miss.
    ///
    /// A `NotFound`-style error from the compute closure propagates unchanged
    /// and does not populate the cache; only successful lookups are stored.
    pub async fn get_or_compute_single<T, F, Fut, E>(
        &self,
        key: &CacheKey,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute(key, compute).await
    }

    async fn get_or_compute<T, F, Fut, E>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if !self.config.is_enabled() {
            return compute().await;
        }

        match self.store.get(key) {
            Ok(Some(cached)) => match serde_json::from_value(cached) {
                Ok(value) => {
                    counter!(METRIC_CACHE_HIT).increment(1);
                    debug!(cache_key = %key, "cache hit");
                    return Ok(value);
                }
                Err(error) => {
                    // Shape drift across releases; treat as a miss and let
                    // the fresh value overwrite the stale entry.
                    warn!(cache_key = %key, %error, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {}
            Err(error) => {
                counter!(METRIC_CACHE_STORE_ERROR).increment(1);
                warn!(cache_key = %key, %error, "cache store read failed; serving live query");
            }
        }

        counter!(METRIC_CACHE_MISS).increment(1);
        debug!(cache_key = %key, "cache miss");

        let value = compute().await?;

        match serde_json::to_value(&value) {
            Ok(serialized) => {
                if let Err(error) = self.store.set(key, serialized, self.config.entry_ttl()) {
                    counter!(METRIC_CACHE_STORE_ERROR).increment(1);
                    warn!(cache_key = %key, %error, "cache store write failed");
                }
            }
            Err(error) => {
                warn!(cache_key = %key, %error, "value not serializable; skipping cache populate");
            }
        }

        Ok(value)
    }
}
