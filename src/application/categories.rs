//! Category catalog service.
//!
//! Categories form a tree. The composed `full_name` is denormalized on every
//! node, so a rename or re-parenting propagates to the whole subtree in one
//! explicit breadth-first pass. A visited set bounds the walk even if a cycle
//! were ever introduced through the database directly.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::cache::{CacheKey, CacheReader, EntityEvent, Invalidator};
use crate::domain::derive::{compose_full_name, default_meta};
use crate::domain::entities::{AttributeRecord, AttributeValueRecord, CategoryRecord};
use crate::domain::error::DomainError;
use crate::domain::slug::derive_slug;

use super::error::AppError;
use super::repos::{AttributesRepo, CategoriesRepo};

const DUPLICATE_TOP_LEVEL_URL: &str = "this category link is already in use";
const SELF_PARENT: &str = "a category cannot be its own subcategory";

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
}

/// An attribute defined on a category, together with its typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAttribute {
    pub attribute: AttributeRecord,
    pub values: Vec<AttributeValueRecord>,
}

#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoriesRepo>,
    attributes: Arc<dyn AttributesRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoriesRepo>,
        attributes: Arc<dyn AttributesRepo>,
        cache: CacheReader,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            categories,
            attributes,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::Categories, || async {
                self.categories.list().await.map_err(AppError::from)
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<CategoryRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::Category(id), || async {
                self.categories.get(id).await.map_err(AppError::from)
            })
            .await
    }

    /// Attributes of one category with their values, grouped per attribute.
    /// Cached under the category namespace, so any category write sweeps it.
    pub async fn attributes(&self, id: Uuid) -> Result<Vec<CategoryAttribute>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::CategoryAttributes(id), || async {
                let attributes = self
                    .attributes
                    .list_for_category(id)
                    .await
                    .map_err(AppError::from)?;

                // A category without attributes and a missing category both
                // yield an empty set; only the latter is an error.
                if attributes.is_empty() {
                    self.categories.get(id).await?;
                    return Ok(Vec::new());
                }

                let mut grouped: HashMap<Uuid, Vec<AttributeValueRecord>> = HashMap::new();
                for value in self
                    .attributes
                    .list_values_for_category(id)
                    .await
                    .map_err(AppError::from)?
                {
                    grouped.entry(value.attribute_id).or_default().push(value);
                }

                Ok(attributes
                    .into_iter()
                    .map(|attribute| CategoryAttribute {
                        values: grouped.remove(&attribute.id).unwrap_or_default(),
                        attribute,
                    })
                    .collect())
            })
            .await
    }

    pub async fn create(&self, command: CreateCategoryCommand) -> Result<CategoryRecord, AppError> {
        let parent = match command.parent_id {
            Some(parent_id) => Some(self.categories.get(parent_id).await?),
            None => None,
        };

        let url = match command.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => derive_slug(&command.name)?,
        };

        // Top-level categories share one url namespace.
        if parent.is_none() && self.categories.top_level_url_exists(&url, None).await? {
            return Err(DomainError::validation(DUPLICATE_TOP_LEVEL_URL).into());
        }

        let full_name =
            compose_full_name(parent.as_ref().map(|p| p.full_name.as_str()), &command.name);
        let now = OffsetDateTime::now_utc();

        let category = CategoryRecord {
            id: Uuid::new_v4(),
            parent_id: parent.as_ref().map(|p| p.id),
            full_name,
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.description),
            name: command.name,
            url,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        self.categories.insert(&category).await?;
        self.invalidator
            .apply(&[EntityEvent::CategorySaved { id: category.id }])?;
        Ok(category)
    }

    pub async fn update(
        &self,
        id: Uuid,
        command: UpdateCategoryCommand,
    ) -> Result<CategoryRecord, AppError> {
        let stored = self.categories.get(id).await?;

        // Self-parenting is checked against both the proposed parent from the
        // request and the already persisted one: the request-side check sees
        // an in-flight parent before it is stored, the persisted-side check
        // covers flows that never pass through this command.
        if command.parent_id == Some(id) || stored.parent_id == Some(id) {
            return Err(DomainError::validation(SELF_PARENT).into());
        }

        let parent = match command.parent_id {
            Some(parent_id) => Some(self.categories.get(parent_id).await?),
            None => None,
        };

        let url = match command.url {
            Some(url) if !url.trim().is_empty() => url,
            _ => derive_slug(&command.name)?,
        };

        if parent.is_none()
            && self
                .categories
                .top_level_url_exists(&url, Some(id))
                .await?
        {
            return Err(DomainError::validation(DUPLICATE_TOP_LEVEL_URL).into());
        }

        let full_name =
            compose_full_name(parent.as_ref().map(|p| p.full_name.as_str()), &command.name);

        let category = CategoryRecord {
            parent_id: parent.as_ref().map(|p| p.id),
            full_name: full_name.clone(),
            meta_title: default_meta(&command.meta_title, &command.name),
            meta_description: default_meta(&command.meta_description, &command.description),
            name: command.name,
            url,
            description: command.description,
            updated_at: OffsetDateTime::now_utc(),
            ..stored.clone()
        };

        self.categories.update(&category).await?;

        // Snapshot comparison replaces field-level dirty tracking: only a
        // changed full name requires touching the subtree.
        if stored.full_name != category.full_name {
            self.propagate_full_names(id, &full_name).await?;
        }

        self.invalidator
            .apply(&[EntityEvent::CategorySaved { id }])?;
        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let stored = self.categories.get(id).await?;
        self.categories.delete(stored.id).await?;
        self.invalidator
            .apply(&[EntityEvent::CategoryDeleted { id }])?;
        Ok(())
    }

    /// Recompute `full_name` for every descendant of `root`, breadth first.
    async fn propagate_full_names(&self, root: Uuid, root_full_name: &str) -> Result<(), AppError> {
        let mut visited: HashSet<Uuid> = HashSet::from([root]);
        let mut queue: VecDeque<(Uuid, String)> =
            VecDeque::from([(root, root_full_name.to_string())]);
        let mut updated = 0usize;

        while let Some((parent_id, parent_full_name)) = queue.pop_front() {
            for child in self.categories.children(parent_id).await? {
                if !visited.insert(child.id) {
                    continue;
                }
                let child_full_name = compose_full_name(Some(&parent_full_name), &child.name);
                if child_full_name != child.full_name {
                    self.categories
                        .set_full_name(child.id, &child_full_name)
                        .await?;
                    updated += 1;
                }
                queue.push_back((child.id, child_full_name));
            }
        }

        if updated > 0 {
            debug!(root = %root, updated, "propagated category full names");
        }
        Ok(())
    }
}
