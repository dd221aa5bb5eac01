use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    application::repos::{AttributesRepo, RepoError},
    domain::entities::{AttributeRecord, AttributeValueRecord},
    domain::types::AttributeValue,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct AttributeRow {
    id: Uuid,
    category_id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct AttributeValueRow {
    id: Uuid,
    attribute_id: Uuid,
    value: Json<AttributeValue>,
}

#[async_trait]
impl AttributesRepo for PostgresRepositories {
    async fn list_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AttributeRow>(
            "SELECT id, category_id, name FROM attributes \
             WHERE category_id = $1 ORDER BY name, id",
        )
        .bind(category_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AttributeRecord {
                id: row.id,
                category_id: row.category_id,
                name: row.name,
            })
            .collect())
    }

    async fn list_values_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<AttributeValueRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AttributeValueRow>(
            "SELECT v.id, v.attribute_id, v.value FROM attribute_values v \
             JOIN attributes a ON a.id = v.attribute_id \
             WHERE a.category_id = $1 ORDER BY v.attribute_id, v.id",
        )
        .bind(category_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AttributeValueRecord {
                id: row.id,
                attribute_id: row.attribute_id,
                value: row.value.0,
            })
            .collect())
    }
}
