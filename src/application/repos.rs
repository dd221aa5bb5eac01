//! Repository traits describing persistence adapters.
//!
//! Services speak only to these traits; the Postgres implementations live in
//! `infra::db` and tests substitute in-memory fakes. Counter maintenance is a
//! repository concern (`adjust_*`) so increments happen atomically at the
//! store, never as application-level read-modify-write.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{
    AttributeRecord, AttributeValueRecord, BrandRecord, CategoryRecord, CommentRecord, LikeRecord,
    ProductItemRecord, ProductMediaRecord, ProductRecord, UserRecord,
};
use crate::domain::types::{CommentScope, ListScope};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

#[async_trait]
pub trait BrandsRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<BrandRecord>, RepoError>;
    async fn get_by_url(&self, url: &str) -> Result<BrandRecord, RepoError>;
    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;
    async fn insert(&self, brand: &BrandRecord) -> Result<(), RepoError>;
    async fn update(&self, brand: &BrandRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<CategoryRecord>, RepoError>;
    async fn get(&self, id: Uuid) -> Result<CategoryRecord, RepoError>;
    async fn children(&self, parent_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError>;
    /// Whether another top-level category already uses this url.
    async fn top_level_url_exists(
        &self,
        url: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError>;
    async fn insert(&self, category: &CategoryRecord) -> Result<(), RepoError>;
    async fn update(&self, category: &CategoryRecord) -> Result<(), RepoError>;
    async fn set_full_name(&self, id: Uuid, full_name: &str) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait AttributesRepo: Send + Sync {
    async fn list_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeRecord>, RepoError>;
    /// Values for every attribute of the category, in one read.
    async fn list_values_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeValueRecord>, RepoError>;
}

#[async_trait]
pub trait ProductsRepo: Send + Sync {
    async fn list(&self, scope: ListScope) -> Result<Vec<ProductRecord>, RepoError>;
    async fn list_by_category(
        &self,
        category_id: Uuid,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError>;
    async fn list_by_brand(
        &self,
        brand_url: &str,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError>;
    async fn get(&self, id: Uuid) -> Result<ProductRecord, RepoError>;
    async fn get_by_url(&self, url: &str) -> Result<ProductRecord, RepoError>;
    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError>;
    async fn insert(&self, product: &ProductRecord) -> Result<(), RepoError>;
    async fn update(&self, product: &ProductRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
    /// Persist the derived cheapest-item reference.
    async fn set_cheapest_item(
        &self,
        product_id: Uuid,
        item_id: Option<Uuid>,
    ) -> Result<(), RepoError>;
    /// Atomic store-level counter delta; never read-modify-write.
    async fn adjust_comments_count(&self, product_id: Uuid, delta: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ProductItemsRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductItemRecord>, RepoError>;
    async fn get(&self, id: Uuid) -> Result<ProductItemRecord, RepoError>;
    async fn list_for_product(&self, product_id: Uuid)
    -> Result<Vec<ProductItemRecord>, RepoError>;
    async fn insert(&self, item: &ProductItemRecord) -> Result<(), RepoError>;
    async fn update(&self, item: &ProductItemRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ProductMediaRepo: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<ProductMediaRecord, RepoError>;
    async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductMediaRecord>, RepoError>;
    async fn insert(&self, media: &ProductMediaRecord) -> Result<(), RepoError>;
    async fn update(&self, media: &ProductMediaRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CommentsRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<CommentRecord>, RepoError>;
    async fn get(&self, id: Uuid) -> Result<CommentRecord, RepoError>;
    /// Product comment listing; when a viewer is supplied each record's
    /// `liked_by_viewer` is annotated from the likes table.
    async fn list_for_product(
        &self,
        product_id: Uuid,
        scope: CommentScope,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentRecord>, RepoError>;
    /// Fails with `Duplicate` when the (user, product) pair already exists.
    async fn insert(&self, comment: &CommentRecord) -> Result<(), RepoError>;
    async fn update(&self, comment: &CommentRecord) -> Result<(), RepoError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
    /// Atomic store-level counter delta; never read-modify-write.
    async fn adjust_likes_count(&self, comment_id: Uuid, delta: i64) -> Result<(), RepoError>;
}

#[async_trait]
pub trait LikesRepo: Send + Sync {
    /// Fails with `Duplicate` when the (user, comment) pair already exists.
    async fn insert(&self, like: &LikeRecord) -> Result<(), RepoError>;
    async fn delete_by_user_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>, RepoError>;
    async fn get_by_username(&self, username: &str) -> Result<UserRecord, RepoError>;
    /// Whether this user has a purchased-products row for the product.
    async fn has_purchased(&self, user_id: Uuid, product_id: Uuid) -> Result<bool, RepoError>;
    async fn insert(&self, user: &UserRecord) -> Result<(), RepoError>;
    async fn update(&self, user: &UserRecord) -> Result<(), RepoError>;
    async fn delete_by_username(&self, username: &str) -> Result<(), RepoError>;
}
