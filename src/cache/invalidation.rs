//! Write-path cache invalidation.
//!
//! Every successful persist or delete emits one or more [`EntityEvent`]s.
//! Events merge into an [`InvalidationPlan`]: the entity's own singleton key
//! plus every collection key whose contents include the entity, walking its
//! denormalizing relations (owning category and brand for products, owning
//! product for items and comments, owning comment for likes). The plan is
//! applied against the store before the mutating call returns.
//!
//! Category events use pattern eviction over the whole category namespace
//! instead of enumerating keys; the category catalog is small and typically
//! fetched in full, so coarse invalidation there is cheap in aggregate.
//!
//! Eviction runs after recomputation has been persisted, so the next miss
//! repopulates from post-write state. Between our eviction and the next
//! repopulate there is the usual read-through window: a reader that began
//! computing before the eviction may store a value that is stale by one
//! write. The window closes on the next write or explicit eviction.

use std::collections::HashSet;
use std::sync::Arc;

use metrics::counter;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::ProductRecord;
use crate::domain::types::{CommentScope, ListScope};

use super::config::CacheConfig;
use super::keys::{CacheKey, KeyPattern};
use super::store::{CacheStore, CacheStoreError};

pub const METRIC_CACHE_EVICT: &str = "rasteh_cache_evict_total";

/// The product-identifying fields invalidation needs.
///
/// Captured at event time from the persisted record, so eviction reflects the
/// relations the entity actually had when it changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductRef {
    pub url: String,
    pub category_id: Uuid,
    pub brand_url: Option<String>,
}

impl From<&ProductRecord> for ProductRef {
    fn from(product: &ProductRecord) -> Self {
        Self {
            url: product.url.clone(),
            category_id: product.category_id,
            brand_url: product.brand_url.clone(),
        }
    }
}

/// A cache-relevant mutation of one entity.
///
/// `Saved` covers both create and update; the key set is identical because
/// membership in a collection can change either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityEvent {
    BrandSaved { url: String },
    BrandDeleted { url: String },
    CategorySaved { id: Uuid },
    CategoryDeleted { id: Uuid },
    ProductSaved { product: ProductRef },
    ProductDeleted { product: ProductRef },
    ProductItemSaved { id: Uuid, product: ProductRef },
    ProductItemDeleted { id: Uuid, product: ProductRef },
    ProductMediaSaved { product_url: String },
    ProductMediaDeleted { product_url: String },
    CommentSaved { id: Uuid, product_id: Uuid },
    CommentDeleted { id: Uuid, product_id: Uuid },
    LikeSaved { comment_id: Uuid, product_id: Uuid },
    LikeDeleted { comment_id: Uuid, product_id: Uuid },
    UserSaved { username: String },
    UserDeleted { username: String },
}

/// The merged set of evictions for a batch of events.
#[derive(Debug, Default)]
pub struct InvalidationPlan {
    pub keys: HashSet<CacheKey>,
    pub patterns: HashSet<KeyPattern>,
}

impl InvalidationPlan {
    /// Merge events into a deduplicated eviction set.
    pub fn from_events(events: &[EntityEvent]) -> Self {
        let mut plan = Self::default();
        for event in events {
            plan.absorb(event);
        }
        plan
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.patterns.is_empty()
    }

    fn absorb(&mut self, event: &EntityEvent) {
        match event {
            EntityEvent::BrandSaved { url } | EntityEvent::BrandDeleted { url } => {
                self.keys.insert(CacheKey::Brand(url.clone()));
                self.keys.insert(CacheKey::Brands);
            }
            EntityEvent::CategorySaved { .. } | EntityEvent::CategoryDeleted { .. } => {
                self.patterns.insert(KeyPattern::categories());
            }
            EntityEvent::ProductSaved { product } | EntityEvent::ProductDeleted { product } => {
                self.absorb_product(product);
            }
            EntityEvent::ProductItemSaved { id, product }
            | EntityEvent::ProductItemDeleted { id, product } => {
                self.keys.insert(CacheKey::ProductItem(*id));
                self.keys.insert(CacheKey::ProductItems);
                // Item changes move the product's derived cheapest price, so
                // the whole product-scoped key set goes with them.
                self.absorb_product(product);
            }
            EntityEvent::ProductMediaSaved { product_url }
            | EntityEvent::ProductMediaDeleted { product_url } => {
                self.keys.insert(CacheKey::Product(product_url.clone()));
            }
            EntityEvent::CommentSaved { id, product_id }
            | EntityEvent::CommentDeleted { id, product_id } => {
                self.keys.insert(CacheKey::Comment(*id));
                self.keys.insert(CacheKey::Comments);
                self.absorb_product_comments(*product_id);
            }
            EntityEvent::LikeSaved {
                comment_id,
                product_id,
            }
            | EntityEvent::LikeDeleted {
                comment_id,
                product_id,
            } => {
                self.keys.insert(CacheKey::Comment(*comment_id));
                self.keys.insert(CacheKey::Comments);
                self.absorb_product_comments(*product_id);
            }
            EntityEvent::UserSaved { username } | EntityEvent::UserDeleted { username } => {
                self.keys.insert(CacheKey::User(username.clone()));
                self.keys.insert(CacheKey::Users);
            }
        }
    }

    fn absorb_product(&mut self, product: &ProductRef) {
        self.keys.insert(CacheKey::Product(product.url.clone()));
        for scope in [ListScope::All, ListScope::Visible] {
            self.keys.insert(CacheKey::Products(scope));
            self.keys.insert(CacheKey::CategoryProducts {
                category_id: product.category_id,
                scope,
            });
            self.keys.insert(CacheKey::BrandProducts {
                brand_url: product.brand_url.clone(),
                scope,
            });
        }
    }

    fn absorb_product_comments(&mut self, product_id: Uuid) {
        for scope in [CommentScope::All, CommentScope::Published] {
            self.keys.insert(CacheKey::ProductComments { product_id, scope });
        }
    }
}

/// Applies invalidation plans against the store.
///
/// Shared by every service; a no-op when the cache is disabled. Store errors
/// are returned to the caller: an eviction that silently fails would leave
/// stale entries pinned forever, so the write path surfaces it.
#[derive(Clone)]
pub struct Invalidator {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl Invalidator {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Merge the events into a plan and evict every key it names.
    pub fn apply(&self, events: &[EntityEvent]) -> Result<(), CacheStoreError> {
        if !self.config.is_enabled() {
            return Ok(());
        }

        let plan = InvalidationPlan::from_events(events);
        if plan.is_empty() {
            return Ok(());
        }

        let keys: Vec<CacheKey> = plan.keys.into_iter().collect();
        debug!(
            evicted_keys = keys.len(),
            evicted_patterns = plan.patterns.len(),
            "applying invalidation plan"
        );
        counter!(METRIC_CACHE_EVICT).increment(keys.len() as u64);

        self.store.delete_many(&keys)?;
        for pattern in &plan.patterns {
            self.store.delete_matching(pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_ref(brand: Option<&str>) -> ProductRef {
        ProductRef {
            url: "galaxy-s24".to_string(),
            category_id: Uuid::from_bytes([7; 16]),
            brand_url: brand.map(str::to_string),
        }
    }

    #[test]
    fn brand_events_cover_singleton_and_list() {
        let plan = InvalidationPlan::from_events(&[EntityEvent::BrandSaved {
            url: "apple".to_string(),
        }]);

        assert!(plan.keys.contains(&CacheKey::Brand("apple".to_string())));
        assert!(plan.keys.contains(&CacheKey::Brands));
        assert_eq!(plan.keys.len(), 2);
    }

    #[test]
    fn category_events_use_namespace_pattern() {
        let plan = InvalidationPlan::from_events(&[EntityEvent::CategorySaved {
            id: Uuid::nil(),
        }]);

        assert!(plan.keys.is_empty());
        assert!(plan.patterns.contains(&KeyPattern::categories()));
    }

    #[test]
    fn product_event_covers_every_denormalized_collection() {
        let product = product_ref(Some("samsung"));
        let plan = InvalidationPlan::from_events(&[EntityEvent::ProductSaved {
            product: product.clone(),
        }]);

        assert!(plan.keys.contains(&CacheKey::Product(product.url.clone())));
        for scope in [ListScope::All, ListScope::Visible] {
            assert!(plan.keys.contains(&CacheKey::Products(scope)));
            assert!(plan.keys.contains(&CacheKey::CategoryProducts {
                category_id: product.category_id,
                scope,
            }));
            assert!(plan.keys.contains(&CacheKey::BrandProducts {
                brand_url: Some("samsung".to_string()),
                scope,
            }));
        }
        assert_eq!(plan.keys.len(), 7);
    }

    #[test]
    fn brandless_product_evicts_sentinel_scope() {
        let plan = InvalidationPlan::from_events(&[EntityEvent::ProductSaved {
            product: product_ref(None),
        }]);

        for scope in [ListScope::All, ListScope::Visible] {
            assert!(plan.keys.contains(&CacheKey::BrandProducts {
                brand_url: None,
                scope,
            }));
        }
    }

    #[test]
    fn item_event_includes_item_and_product_keys() {
        let item_id = Uuid::from_bytes([3; 16]);
        let plan = InvalidationPlan::from_events(&[EntityEvent::ProductItemSaved {
            id: item_id,
            product: product_ref(Some("samsung")),
        }]);

        assert!(plan.keys.contains(&CacheKey::ProductItem(item_id)));
        assert!(plan.keys.contains(&CacheKey::ProductItems));
        assert!(plan.keys.contains(&CacheKey::Product("galaxy-s24".to_string())));
        assert!(plan.keys.contains(&CacheKey::Products(ListScope::Visible)));
    }

    #[test]
    fn comment_event_covers_product_comment_lists() {
        let comment_id = Uuid::from_bytes([1; 16]);
        let product_id = Uuid::from_bytes([2; 16]);
        let plan = InvalidationPlan::from_events(&[EntityEvent::CommentSaved {
            id: comment_id,
            product_id,
        }]);

        assert!(plan.keys.contains(&CacheKey::Comment(comment_id)));
        assert!(plan.keys.contains(&CacheKey::Comments));
        for scope in [CommentScope::All, CommentScope::Published] {
            assert!(plan.keys.contains(&CacheKey::ProductComments { product_id, scope }));
        }
    }

    #[test]
    fn merged_events_deduplicate_keys() {
        let product = product_ref(Some("samsung"));
        let plan = InvalidationPlan::from_events(&[
            EntityEvent::ProductSaved {
                product: product.clone(),
            },
            EntityEvent::ProductSaved { product },
        ]);

        assert_eq!(plan.keys.len(), 7);
    }

    #[test]
    fn empty_events_make_an_empty_plan() {
        assert!(InvalidationPlan::from_events(&[]).is_empty());
    }
}
