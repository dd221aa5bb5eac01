//! Product, product-item, and product-media services.
//!
//! The cheapest-item reference on a product derives from its items, so the
//! recomputation hook hangs off the item write path: every item create,
//! update, or delete re-derives the reference from the freshly persisted item
//! set and stores it before any cache key is evicted. Concurrent item writers
//! may race, but each hook recomputes from current persisted state, so the
//! last one to run leaves the correct value.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::cache::{CacheKey, CacheReader, EntityEvent, Invalidator, ProductRef};
use crate::domain::derive::{
    availability_for_inventory, cheapest_item, default_meta, default_selling_price,
};
use crate::domain::entities::{ProductItemRecord, ProductMediaRecord, ProductRecord};
use crate::domain::slug::generate_unique_slug;
use crate::domain::types::{ListScope, MediaType};

use super::error::AppError;
use super::repos::{BrandsRepo, ProductItemsRepo, ProductMediaRepo, ProductsRepo};

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub category_id: Uuid,
    pub brand_url: Option<String>,
    pub name: String,
    pub url: Option<String>,
    pub introduction: String,
    pub review: String,
    pub meta_title: String,
    pub meta_description: String,
    pub is_visible: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub category_id: Uuid,
    pub brand_url: Option<String>,
    pub name: String,
    pub url: Option<String>,
    pub introduction: String,
    pub review: String,
    pub meta_title: String,
    pub meta_description: String,
    pub is_visible: bool,
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductsRepo>,
    items: Arc<dyn ProductItemsRepo>,
    brands: Arc<dyn BrandsRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductsRepo>,
        items: Arc<dyn ProductItemsRepo>,
        brands: Arc<dyn BrandsRepo>,
        cache: CacheReader,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            products,
            items,
            brands,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self, scope: ListScope) -> Result<Vec<ProductRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::Products(scope), || async {
                self.products.list(scope).await.map_err(AppError::from)
            })
            .await
    }

    pub async fn list_by_category(
        &self,
        category_id: Uuid,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, AppError> {
        self.cache
            .get_or_compute_collection(
                &CacheKey::CategoryProducts { category_id, scope },
                || async {
                    self.products
                        .list_by_category(category_id, scope)
                        .await
                        .map_err(AppError::from)
                },
            )
            .await
    }

    pub async fn list_by_brand(
        &self,
        brand_url: &str,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, AppError> {
        self.cache
            .get_or_compute_collection(
                &CacheKey::BrandProducts {
                    brand_url: Some(brand_url.to_string()),
                    scope,
                },
                || async {
                    self.products
                        .list_by_brand(brand_url, scope)
                        .await
                        .map_err(AppError::from)
                },
            )
            .await
    }

    pub async fn get(&self, url: &str) -> Result<ProductRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::Product(url.to_string()), || async {
                self.products.get_by_url(url).await.map_err(AppError::from)
            })
            .await
    }

    pub async fn create(&self, command: CreateProductCommand) -> Result<ProductRecord, AppError> {
        let brand = match command.brand_url.as_deref() {
            Some(brand_url) => Some(self.brands.get_by_url(brand_url).await?),
            None => None,
        };

        let url = self.resolve_url(command.url, &command.name, None).await?;
        let now = OffsetDateTime::now_utc();

        let product = ProductRecord {
            id: Uuid::new_v4(),
            category_id: command.category_id,
            brand_id: brand.as_ref().map(|b| b.id),
            brand_url: brand.as_ref().map(|b| b.url.clone()),
            // No items yet, so nothing can qualify.
            cheapest_item_id: None,
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.introduction),
            name: command.name,
            url,
            introduction: command.introduction,
            review: command.review,
            is_available: false,
            is_visible: command.is_visible,
            rating: 0.0,
            comments_count: 0,
            views_count: 0,
            sold_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.products.insert(&product).await?;
        self.invalidator.apply(&[EntityEvent::ProductSaved {
            product: ProductRef::from(&product),
        }])?;
        Ok(product)
    }

    pub async fn update(
        &self,
        url: &str,
        command: UpdateProductCommand,
    ) -> Result<ProductRecord, AppError> {
        let stored = self.products.get_by_url(url).await?;

        let brand = match command.brand_url.as_deref() {
            Some(brand_url) => Some(self.brands.get_by_url(brand_url).await?),
            None => None,
        };

        let new_url = self
            .resolve_url(command.url, &command.name, Some(stored.id))
            .await?;

        // Re-derive from persisted items, not from whatever the last cached
        // read believed.
        let items = self.items.list_for_product(stored.id).await?;
        let cheapest = cheapest_item(&items);

        let product = ProductRecord {
            category_id: command.category_id,
            brand_id: brand.as_ref().map(|b| b.id),
            brand_url: brand.as_ref().map(|b| b.url.clone()),
            cheapest_item_id: cheapest,
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.introduction),
            name: command.name,
            url: new_url,
            introduction: command.introduction,
            review: command.review,
            is_available: cheapest.is_some(),
            is_visible: command.is_visible,
            updated_at: OffsetDateTime::now_utc(),
            ..stored.clone()
        };

        self.products.update(&product).await?;

        // The pre-write snapshot may belong to different collections (old
        // category, old brand, old slug); evict both memberships.
        let mut events = vec![EntityEvent::ProductSaved {
            product: ProductRef::from(&product),
        }];
        let old_ref = ProductRef::from(&stored);
        if old_ref != ProductRef::from(&product) {
            events.push(EntityEvent::ProductSaved { product: old_ref });
        }
        self.invalidator.apply(&events)?;
        Ok(product)
    }

    pub async fn delete(&self, url: &str) -> Result<(), AppError> {
        let stored = self.products.get_by_url(url).await?;
        self.products.delete(stored.id).await?;
        self.invalidator.apply(&[EntityEvent::ProductDeleted {
            product: ProductRef::from(&stored),
        }])?;
        Ok(())
    }

    async fn resolve_url(
        &self,
        requested: Option<String>,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<String, AppError> {
        match requested {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => {
                let url = generate_unique_slug(name, |candidate| {
                    let repo = self.products.clone();
                    let candidate = candidate.to_string();
                    async move { repo.url_exists(&candidate, exclude).await.map(|taken| !taken) }
                })
                .await?;
                Ok(url)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductItemCommand {
    pub product_id: Uuid,
    pub sku: Option<String>,
    pub original_price: i64,
    pub selling_price: i64,
    pub inventory: i64,
    pub is_available: bool,
    pub is_visible: bool,
}

pub type UpdateProductItemCommand = CreateProductItemCommand;

#[derive(Clone)]
pub struct ProductItemService {
    items: Arc<dyn ProductItemsRepo>,
    products: Arc<dyn ProductsRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl ProductItemService {
    pub fn new(
        items: Arc<dyn ProductItemsRepo>,
        products: Arc<dyn ProductsRepo>,
        cache: CacheReader,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            items,
            products,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<ProductItemRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::ProductItems, || async {
                self.items.list().await.map_err(AppError::from)
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<ProductItemRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::ProductItem(id), || async {
                self.items.get(id).await.map_err(AppError::from)
            })
            .await
    }

    pub async fn create(
        &self,
        command: CreateProductItemCommand,
    ) -> Result<ProductItemRecord, AppError> {
        let product = self.products.get(command.product_id).await?;

        let item = ProductItemRecord {
            id: Uuid::new_v4(),
            product_id: product.id,
            sku: command.sku,
            original_price: command.original_price,
            selling_price: default_selling_price(command.selling_price, command.original_price),
            inventory: command.inventory,
            is_available: availability_for_inventory(command.inventory, command.is_available),
            is_visible: command.is_visible,
        };

        self.items.insert(&item).await?;
        let product = self.refresh_cheapest(&product).await?;

        self.invalidator.apply(&[EntityEvent::ProductItemSaved {
            id: item.id,
            product: ProductRef::from(&product),
        }])?;
        Ok(item)
    }

    pub async fn update(
        &self,
        id: Uuid,
        command: UpdateProductItemCommand,
    ) -> Result<ProductItemRecord, AppError> {
        let stored = self.items.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        let item = ProductItemRecord {
            sku: command.sku,
            original_price: command.original_price,
            selling_price: default_selling_price(command.selling_price, command.original_price),
            inventory: command.inventory,
            is_available: availability_for_inventory(command.inventory, command.is_available),
            is_visible: command.is_visible,
            ..stored
        };

        self.items.update(&item).await?;
        let product = self.refresh_cheapest(&product).await?;

        self.invalidator.apply(&[EntityEvent::ProductItemSaved {
            id: item.id,
            product: ProductRef::from(&product),
        }])?;
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let stored = self.items.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        self.items.delete(id).await?;
        let product = self.refresh_cheapest(&product).await?;

        self.invalidator.apply(&[EntityEvent::ProductItemDeleted {
            id,
            product: ProductRef::from(&product),
        }])?;
        Ok(())
    }

    /// Re-derive and persist the owning product's cheapest-item reference
    /// from the current persisted item set.
    async fn refresh_cheapest(&self, product: &ProductRecord) -> Result<ProductRecord, AppError> {
        let items = self.items.list_for_product(product.id).await?;
        let cheapest = cheapest_item(&items);
        self.products.set_cheapest_item(product.id, cheapest).await?;

        let mut refreshed = product.clone();
        refreshed.cheapest_item_id = cheapest;
        refreshed.is_available = cheapest.is_some();
        Ok(refreshed)
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductMediaCommand {
    pub product_id: Uuid,
    pub file_path: String,
    pub media_type: MediaType,
    pub alternate_text: String,
}

#[derive(Clone)]
pub struct ProductMediaService {
    media: Arc<dyn ProductMediaRepo>,
    products: Arc<dyn ProductsRepo>,
    invalidator: Invalidator,
}

impl ProductMediaService {
    pub fn new(
        media: Arc<dyn ProductMediaRepo>,
        products: Arc<dyn ProductsRepo>,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            media,
            products,
            invalidator,
        }
    }

    pub async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductMediaRecord>, AppError> {
        self.media
            .list_for_product(product_id)
            .await
            .map_err(AppError::from)
    }

    pub async fn create(
        &self,
        command: CreateProductMediaCommand,
    ) -> Result<ProductMediaRecord, AppError> {
        let product = self.products.get(command.product_id).await?;

        let media = ProductMediaRecord {
            id: Uuid::new_v4(),
            product_id: product.id,
            file_path: command.file_path,
            media_type: command.media_type,
            alternate_text: command.alternate_text,
        };

        self.media.insert(&media).await?;
        self.invalidator.apply(&[EntityEvent::ProductMediaSaved {
            product_url: product.url,
        }])?;
        Ok(media)
    }

    pub async fn replace_file(
        &self,
        id: Uuid,
        file_path: String,
        alternate_text: String,
    ) -> Result<ProductMediaRecord, AppError> {
        let stored = self.media.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        // Snapshot comparison stands in for a file-changed hook; storage
        // cleanup of the replaced file belongs to the upload layer.
        let file_changed = stored.file_path != file_path;

        let media = ProductMediaRecord {
            file_path,
            alternate_text,
            ..stored
        };

        self.media.update(&media).await?;
        if file_changed {
            self.invalidator.apply(&[EntityEvent::ProductMediaSaved {
                product_url: product.url,
            }])?;
        }
        Ok(media)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let stored = self.media.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        self.media.delete(id).await?;
        self.invalidator.apply(&[EntityEvent::ProductMediaDeleted {
            product_url: product.url,
        }])?;
        Ok(())
    }
}
