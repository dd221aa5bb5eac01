use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{BrandsRepo, RepoError},
    domain::entities::BrandRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const BRAND_COLUMNS: &str =
    "id, name, url, description, meta_title, meta_description, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct BrandRow {
    id: Uuid,
    name: String,
    url: String,
    description: String,
    meta_title: String,
    meta_description: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<BrandRow> for BrandRecord {
    fn from(row: BrandRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
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
impl BrandsRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<BrandRecord>, RepoError> {
        let rows = sqlx::query_as::<_, BrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands ORDER BY LOWER(name), url"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BrandRecord::from).collect())
    }

    async fn get_by_url(&self, url: &str) -> Result<BrandRecord, RepoError> {
        let row = sqlx::query_as::<_, BrandRow>(&format!(
            "SELECT {BRAND_COLUMNS} FROM brands WHERE url = $1"
        ))
        .bind(url)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(BrandRecord::from(row))
    }

    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM brands WHERE url = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(url)
        .bind(exclude)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn insert(&self, brand: &BrandRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO brands (id, name, url, description, meta_title, meta_description, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(brand.id)
        .bind(&brand.name)
        .bind(&brand.url)
        .bind(&brand.description)
        .bind(&brand.meta_title)
        .bind(&brand.meta_description)
        .bind(brand.created_at)
        .bind(brand.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, brand: &BrandRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE brands SET name = $2, url = $3, description = $4, meta_title = $5, \
             meta_description = $6, updated_at = $7 WHERE id = $1",
        )
        .bind(brand.id)
        .bind(&brand.name)
        .bind(&brand.url)
        .bind(&brand.description)
        .bind(&brand.meta_title)
        .bind(&brand.meta_description)
        .bind(brand.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
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
