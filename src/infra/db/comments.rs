use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CommentsRepo, LikesRepo, RepoError},
    domain::entities::{CommentRecord, LikeRecord},
    domain::types::CommentScope,
};

use super::{PostgresRepositories, map_sqlx_error};

const COMMENT_COLUMNS: &str = "id, user_id, product_id, text, published, is_buyer, likes_count, \
                               created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    text: String,
    published: bool,
    is_buyer: bool,
    likes_count: i64,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            text: row.text,
            published: row.published,
            is_buyer: row.is_buyer,
            likes_count: row.likes_count,
            liked_by_viewer: None,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnnotatedCommentRow {
    id: Uuid,
    user_id: Uuid,
    product_id: Uuid,
    text: String,
    published: bool,
    is_buyer: bool,
    likes_count: i64,
    liked_by_viewer: Option<bool>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<AnnotatedCommentRow> for CommentRecord {
    fn from(row: AnnotatedCommentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            text: row.text,
            published: row.published,
            is_buyer: row.is_buyer,
            likes_count: row.likes_count,
            liked_by_viewer: row.liked_by_viewer,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentsRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<CommentRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at DESC, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<CommentRecord, RepoError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(CommentRecord::from(row))
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
        scope: CommentScope,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT c.id, c.user_id, c.product_id, c.text, c.published, c.is_buyer, \
             c.likes_count, c.created_at, c.updated_at, ",
        );

        match viewer {
            Some(viewer_id) => {
                qb.push("EXISTS (SELECT 1 FROM likes l WHERE l.comment_id = c.id AND l.user_id = ");
                qb.push_bind(viewer_id);
                qb.push(") AS liked_by_viewer ");
            }
            None => {
                qb.push("NULL::boolean AS liked_by_viewer ");
            }
        }

        qb.push(" FROM comments c WHERE c.product_id = ");
        qb.push_bind(product_id);

        if scope == CommentScope::Published {
            qb.push(" AND c.published = TRUE ");
        }

        qb.push(" ORDER BY c.created_at DESC, c.id ");

        let rows = qb
            .build_query_as::<AnnotatedCommentRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn insert(&self, comment: &CommentRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO comments (id, user_id, product_id, text, published, is_buyer, \
             likes_count, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(comment.id)
        .bind(comment.user_id)
        .bind(comment.product_id)
        .bind(&comment.text)
        .bind(comment.published)
        .bind(comment.is_buyer)
        .bind(comment.likes_count)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, comment: &CommentRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE comments SET text = $2, published = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(comment.id)
        .bind(&comment.text)
        .bind(comment.published)
        .bind(comment.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn adjust_likes_count(&self, comment_id: Uuid, delta: i64) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE comments SET likes_count = GREATEST(likes_count + $2, 0) WHERE id = $1",
        )
        .bind(comment_id)
        .bind(delta)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LikesRepo for PostgresRepositories {
    async fn insert(&self, like: &LikeRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO likes (id, user_id, comment_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(like.id)
        .bind(like.user_id)
        .bind(like.comment_id)
        .bind(like.created_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_by_user_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND comment_id = $2")
            .bind(user_id)
            .bind(comment_id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
