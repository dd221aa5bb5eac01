use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{CategoriesRepo, RepoError},
    domain::entities::CategoryRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const CATEGORY_COLUMNS: &str = "id, parent_id, name, full_name, url, description, meta_title, \
                                meta_description, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    parent_id: Option<Uuid>,
    name: String,
    full_name: String,
    url: String,
    description: String,
    meta_title: String,
    meta_description: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            parent_id: row.parent_id,
            name: row.name,
            full_name: row.full_name,
            url: row.url,
            description: row.description,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY full_name"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<CategoryRecord, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(CategoryRecord::from(row))
    }

    async fn children(&self, parent_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = sqlx::query_as::<_, CategoryRow>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = $1 ORDER BY name"
        ))
        .bind(parent_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn top_level_url_exists(
        &self,
        url: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE parent_id IS NULL AND url = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(url)
        .bind(exclude)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn insert(&self, category: &CategoryRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO categories (id, parent_id, name, full_name, url, description, \
             meta_title, meta_description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(category.id)
        .bind(category.parent_id)
        .bind(&category.name)
        .bind(&category.full_name)
        .bind(&category.url)
        .bind(&category.description)
        .bind(&category.meta_title)
        .bind(&category.meta_description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, category: &CategoryRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE categories SET parent_id = $2, name = $3, full_name = $4, url = $5, \
             description = $6, meta_title = $7, meta_description = $8, updated_at = $9 \
             WHERE id = $1",
        )
        .bind(category.id)
        .bind(category.parent_id)
        .bind(&category.name)
        .bind(&category.full_name)
        .bind(&category.url)
        .bind(&category.description)
        .bind(&category.meta_title)
        .bind(&category.meta_description)
        .bind(category.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn set_full_name(&self, id: Uuid, full_name: &str) -> Result<(), RepoError> {
        let result =
            sqlx::query("UPDATE categories SET full_name = $2, updated_at = now() WHERE id = $1")
                .bind(id)
                .bind(full_name)
                .execute(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
