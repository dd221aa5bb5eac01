use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ProductsRepo, RepoError},
    domain::entities::ProductRecord,
    domain::types::ListScope,
};

use super::{PostgresRepositories, map_sqlx_error};

// The brand slug is joined in so invalidation can build brand-scoped keys
// straight from the record.
const PRODUCT_SELECT: &str = "SELECT p.id, p.category_id, p.brand_id, b.url AS brand_url, \
     p.cheapest_item_id, p.name, p.url, p.introduction, p.review, p.meta_title, \
     p.meta_description, p.is_available, p.is_visible, p.rating, p.comments_count, \
     p.views_count, p.sold_count, p.created_at, p.updated_at \
     FROM products p LEFT JOIN brands b ON b.id = p.brand_id";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    category_id: Uuid,
    brand_id: Option<Uuid>,
    brand_url: Option<String>,
    cheapest_item_id: Option<Uuid>,
    name: String,
    url: String,
    introduction: String,
    review: String,
    meta_title: String,
    meta_description: String,
    is_available: bool,
    is_visible: bool,
    rating: f64,
    comments_count: i64,
    views_count: i64,
    sold_count: i64,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            brand_id: row.brand_id,
            brand_url: row.brand_url,
            cheapest_item_id: row.cheapest_item_id,
            name: row.name,
            url: row.url,
            introduction: row.introduction,
            review: row.review,
            meta_title: row.meta_title,
            meta_description: row.meta_description,
            is_available: row.is_available,
            is_visible: row.is_visible,
            rating: row.rating,
            comments_count: row.comments_count,
            views_count: row.views_count,
            sold_count: row.sold_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn apply_scope_condition(qb: &mut QueryBuilder<'_, Postgres>, scope: ListScope) {
    if scope == ListScope::Visible {
        qb.push(" AND p.is_visible = TRUE ");
    }
}

#[async_trait]
impl ProductsRepo for PostgresRepositories {
    async fn list(&self, scope: ListScope) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("{PRODUCT_SELECT} WHERE 1=1 "));
        apply_scope_condition(&mut qb, scope);
        qb.push(" ORDER BY p.created_at DESC, p.id ");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("{PRODUCT_SELECT} WHERE p.category_id = "));
        qb.push_bind(category_id);
        apply_scope_condition(&mut qb, scope);
        qb.push(" ORDER BY p.created_at DESC, p.id ");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn list_by_brand(
        &self,
        brand_url: &str,
        scope: ListScope,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = QueryBuilder::new(format!("{PRODUCT_SELECT} WHERE b.url = "));
        qb.push_bind(brand_url);
        apply_scope_condition(&mut qb, scope);
        qb.push(" ORDER BY p.created_at DESC, p.id ");

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<ProductRecord, RepoError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(ProductRecord::from(row))
    }

    async fn get_by_url(&self, url: &str) -> Result<ProductRecord, RepoError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{PRODUCT_SELECT} WHERE p.url = $1"))
            .bind(url)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(ProductRecord::from(row))
    }

    async fn url_exists(&self, url: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM products WHERE url = $1 \
             AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(url)
        .bind(exclude)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn insert(&self, product: &ProductRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO products (id, category_id, brand_id, cheapest_item_id, name, url, \
             introduction, review, meta_title, meta_description, is_available, is_visible, \
             rating, comments_count, views_count, sold_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18)",
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(product.brand_id)
        .bind(product.cheapest_item_id)
        .bind(&product.name)
        .bind(&product.url)
        .bind(&product.introduction)
        .bind(&product.review)
        .bind(&product.meta_title)
        .bind(&product.meta_description)
        .bind(product.is_available)
        .bind(product.is_visible)
        .bind(product.rating)
        .bind(product.comments_count)
        .bind(product.views_count)
        .bind(product.sold_count)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, product: &ProductRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE products SET category_id = $2, brand_id = $3, cheapest_item_id = $4, \
             name = $5, url = $6, introduction = $7, review = $8, meta_title = $9, \
             meta_description = $10, is_available = $11, is_visible = $12, updated_at = $13 \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(product.category_id)
        .bind(product.brand_id)
        .bind(product.cheapest_item_id)
        .bind(&product.name)
        .bind(&product.url)
        .bind(&product.introduction)
        .bind(&product.review)
        .bind(&product.meta_title)
        .bind(&product.meta_description)
        .bind(product.is_available)
        .bind(product.is_visible)
        .bind(product.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn set_cheapest_item(
        &self,
        product_id: Uuid,
        item_id: Option<Uuid>,
    ) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE products SET cheapest_item_id = $2, is_available = $2 IS NOT NULL, \
             updated_at = now() WHERE id = $1",
        )
        .bind(product_id)
        .bind(item_id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn adjust_comments_count(&self, product_id: Uuid, delta: i64) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE products SET comments_count = GREATEST(comments_count + $2, 0) WHERE id = $1",
        )
        .bind(product_id)
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
