//! Brand catalog service.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::cache::{CacheKey, CacheReader, EntityEvent, Invalidator};
use crate::domain::derive::default_meta;
use crate::domain::entities::BrandRecord;
use crate::domain::slug::generate_unique_slug;

use super::error::AppError;
use super::repos::BrandsRepo;

#[derive(Debug, Clone)]
pub struct CreateBrandCommand {
    pub name: String,
    pub url: Option<String>,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateBrandCommand {
    pub name: String,
    pub url: Option<String>,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
}

#[derive(Clone)]
pub struct BrandService {
    brands: Arc<dyn BrandsRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl BrandService {
    pub fn new(brands: Arc<dyn BrandsRepo>, cache: CacheReader, invalidator: Invalidator) -> Self {
        Self {
            brands,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<BrandRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::Brands, || async {
                self.brands.list().await.map_err(AppError::from)
            })
            .await
    }

    pub async fn get(&self, url: &str) -> Result<BrandRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::Brand(url.to_string()), || async {
                self.brands.get_by_url(url).await.map_err(AppError::from)
            })
            .await
    }

    pub async fn create(&self, command: CreateBrandCommand) -> Result<BrandRecord, AppError> {
        let url = self.resolve_url(command.url, &command.name, None).await?;
        let now = OffsetDateTime::now_utc();

        let brand = BrandRecord {
            id: Uuid::new_v4(),
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.description),
            name: command.name,
            url,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        self.brands.insert(&brand).await?;
        self.invalidator.apply(&[EntityEvent::BrandSaved {
            url: brand.url.clone(),
        }])?;
        Ok(brand)
    }

    pub async fn update(
        &self,
        url: &str,
        command: UpdateBrandCommand,
    ) -> Result<BrandRecord, AppError> {
        let stored = self.brands.get_by_url(url).await?;

        let new_url = self
            .resolve_url(command.url, &command.name, Some(stored.id))
            .await?;

        let brand = BrandRecord {
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.description),
            name: command.name,
            url: new_url,
            description: command.description,
            updated_at: OffsetDateTime::now_utc(),
            ..stored.clone()
        };

        self.brands.update(&brand).await?;

        // A renamed slug leaves its old singleton key behind; evict both.
        let mut events = vec![EntityEvent::BrandSaved {
            url: brand.url.clone(),
        }];
        if stored.url != brand.url {
            events.push(EntityEvent::BrandSaved { url: stored.url });
        }
        self.invalidator.apply(&events)?;
        Ok(brand)
    }

    pub async fn delete(&self, url: &str) -> Result<(), AppError> {
        let stored = self.brands.get_by_url(url).await?;
        self.brands.delete(stored.id).await?;
        self.invalidator
            .apply(&[EntityEvent::BrandDeleted { url: stored.url }])?;
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
                    let repo = self.brands.clone();
                    let candidate = candidate.to_string();
                    async move { repo.url_exists(&candidate, exclude).await.map(|taken| !taken) }
                })
                .await?;
                Ok(url)
            }
        }
    }
}
