//! Comment and like services.
//!
//! Both counters (`comments_count` on products, `likes_count` on comments)
//! are adjusted with store-level deltas through the repositories, so two
//! concurrent writers can never lose an increment. A comment write also
//! touches its product's cached representations, so comment events are always
//! paired with a product event.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::cache::{CacheKey, CacheReader, EntityEvent, Invalidator, ProductRef};
use crate::domain::entities::{CommentRecord, LikeRecord};
use crate::domain::error::DomainError;
use crate::domain::types::CommentScope;

use super::error::AppError;
use super::repos::{CommentsRepo, LikesRepo, ProductsRepo, UsersRepo};

const DUPLICATE_COMMENT: &str = "you have already reviewed this product";
const DUPLICATE_LIKE: &str = "you have already liked this comment";

#[derive(Debug, Clone)]
pub struct CreateCommentCommand {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub text: String,
    pub published: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateCommentCommand {
    pub text: String,
    pub published: bool,
}

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentsRepo>,
    products: Arc<dyn ProductsRepo>,
    users: Arc<dyn UsersRepo>,
    cache: CacheReader,
    invalidator: Invalidator,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentsRepo>,
        products: Arc<dyn ProductsRepo>,
        users: Arc<dyn UsersRepo>,
        cache: CacheReader,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            comments,
            products,
            users,
            cache,
            invalidator,
        }
    }

    pub async fn list(&self) -> Result<Vec<CommentRecord>, AppError> {
        self.cache
            .get_or_compute_collection(&CacheKey::Comments, || async {
                self.comments.list().await.map_err(AppError::from)
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<CommentRecord, AppError> {
        self.cache
            .get_or_compute_single(&CacheKey::Comment(id), || async {
                self.comments.get(id).await.map_err(AppError::from)
            })
            .await
    }

    /// Comments for one product. Anonymous reads go through the cache; a
    /// signed-in viewer gets a direct read because `liked_by_viewer` is
    /// per-viewer and must never be cached under a shared key.
    pub async fn list_for_product(
        &self,
        product_id: Uuid,
        scope: CommentScope,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentRecord>, AppError> {
        if viewer.is_some() {
            return self
                .comments
                .list_for_product(product_id, scope, viewer)
                .await
                .map_err(AppError::from);
        }
        self.cache
            .get_or_compute_collection(&CacheKey::ProductComments { product_id, scope }, || async {
                self.comments
                    .list_for_product(product_id, scope, None)
                    .await
                    .map_err(AppError::from)
            })
            .await
    }

    pub async fn create(&self, command: CreateCommentCommand) -> Result<CommentRecord, AppError> {
        let product = self.products.get(command.product_id).await?;
        let is_buyer = self
            .users
            .has_purchased(command.user_id, product.id)
            .await?;
        let now = OffsetDateTime::now_utc();

        let comment = CommentRecord {
            id: Uuid::new_v4(),
            user_id: command.user_id,
            product_id: product.id,
            text: command.text,
            published: command.published,
            is_buyer,
            likes_count: 0,
            liked_by_viewer: None,
            created_at: now,
            updated_at: now,
        };

        match self.comments.insert(&comment).await {
            Ok(()) => {}
            Err(err) if err.is_duplicate() => {
                return Err(DomainError::validation(DUPLICATE_COMMENT).into());
            }
            Err(err) => return Err(err.into()),
        }

        self.products.adjust_comments_count(product.id, 1).await?;

        self.invalidator.apply(&[
            EntityEvent::CommentSaved {
                id: comment.id,
                product_id: product.id,
            },
            EntityEvent::ProductSaved {
                product: ProductRef::from(&product),
            },
        ])?;
        Ok(comment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        command: UpdateCommentCommand,
    ) -> Result<CommentRecord, AppError> {
        let stored = self.comments.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        let comment = CommentRecord {
            text: command.text,
            published: command.published,
            updated_at: OffsetDateTime::now_utc(),
            ..stored
        };

        self.comments.update(&comment).await?;

        self.invalidator.apply(&[
            EntityEvent::CommentSaved {
                id,
                product_id: product.id,
            },
            EntityEvent::ProductSaved {
                product: ProductRef::from(&product),
            },
        ])?;
        Ok(comment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let stored = self.comments.get(id).await?;
        let product = self.products.get(stored.product_id).await?;

        self.comments.delete(id).await?;
        self.products.adjust_comments_count(product.id, -1).await?;

        self.invalidator.apply(&[
            EntityEvent::CommentDeleted {
                id,
                product_id: product.id,
            },
            EntityEvent::ProductSaved {
                product: ProductRef::from(&product),
            },
        ])?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct LikeService {
    likes: Arc<dyn LikesRepo>,
    comments: Arc<dyn CommentsRepo>,
    invalidator: Invalidator,
}

impl LikeService {
    pub fn new(
        likes: Arc<dyn LikesRepo>,
        comments: Arc<dyn CommentsRepo>,
        invalidator: Invalidator,
    ) -> Self {
        Self {
            likes,
            comments,
            invalidator,
        }
    }

    pub async fn like(&self, user_id: Uuid, comment_id: Uuid) -> Result<LikeRecord, AppError> {
        let comment = self.comments.get(comment_id).await?;

        let like = LikeRecord {
            id: Uuid::new_v4(),
            user_id,
            comment_id,
            created_at: OffsetDateTime::now_utc(),
        };

        match self.likes.insert(&like).await {
            Ok(()) => {}
            Err(err) if err.is_duplicate() => {
                return Err(DomainError::validation(DUPLICATE_LIKE).into());
            }
            Err(err) => return Err(err.into()),
        }

        self.comments.adjust_likes_count(comment_id, 1).await?;

        self.invalidator.apply(&[EntityEvent::LikeSaved {
            comment_id,
            product_id: comment.product_id,
        }])?;
        Ok(like)
    }

    pub async fn unlike(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), AppError> {
        let comment = self.comments.get(comment_id).await?;

        self.likes.delete_by_user_comment(user_id, comment_id).await?;
        self.comments.adjust_likes_count(comment_id, -1).await?;

        self.invalidator.apply(&[EntityEvent::LikeDeleted {
            comment_id,
            product_id: comment.product_id,
        }])?;
        Ok(())
    }
}
