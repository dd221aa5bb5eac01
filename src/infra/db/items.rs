use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{ProductItemsRepo, RepoError},
    domain::entities::ProductItemRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const ITEM_COLUMNS: &str =
    "id, product_id, sku, original_price, selling_price, inventory, is_available, is_visible";

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    product_id: Uuid,
    sku: Option<String>,
    original_price: i64,
    selling_price: i64,
    inventory: i64,
    is_available: bool,
    is_visible: bool,
}

impl From<ItemRow> for ProductItemRecord {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            sku: row.sku,
            original_price: row.original_price,
            selling_price: row.selling_price,
            inventory: row.inventory,
            is_available: row.is_available,
            is_visible: row.is_visible,
        }
    }
}

#[async_trait]
impl ProductItemsRepo for PostgresRepositories {
    async fn list(&self) -> Result<Vec<ProductItemRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM product_items ORDER BY product_id, selling_price, id"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductItemRecord::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<ProductItemRecord, RepoError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM product_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(ProductItemRecord::from(row))
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductItemRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM product_items WHERE product_id = $1 \
             ORDER BY selling_price, id"
        ))
        .bind(product_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductItemRecord::from).collect())
    }

    async fn insert(&self, item: &ProductItemRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO product_items (id, product_id, sku, original_price, selling_price, \
             inventory, is_available, is_visible) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(item.id)
        .bind(item.product_id)
        .bind(&item.sku)
        .bind(item.original_price)
        .bind(item.selling_price)
        .bind(item.inventory)
        .bind(item.is_available)
        .bind(item.is_visible)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, item: &ProductItemRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE product_items SET sku = $2, original_price = $3, selling_price = $4, \
             inventory = $5, is_available = $6, is_visible = $7 WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.sku)
        .bind(item.original_price)
        .bind(item.selling_price)
        .bind(item.inventory)
        .bind(item.is_available)
        .bind(item.is_visible)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM product_items WHERE id = $1")
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
