use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{ProductMediaRepo, RepoError},
    domain::entities::ProductMediaRecord,
    domain::types::MediaType,
};

use super::{PostgresRepositories, map_sqlx_error};

const MEDIA_COLUMNS: &str = "id, product_id, file_path, media_type, alternate_text";

#[derive(sqlx::FromRow)]
struct MediaRow {
    id: Uuid,
    product_id: Uuid,
    file_path: String,
    media_type: String,
    alternate_text: String,
}

impl TryFrom<MediaRow> for ProductMediaRecord {
    type Error = RepoError;

    fn try_from(row: MediaRow) -> Result<Self, RepoError> {
        let media_type = match row.media_type.as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            other => {
                return Err(RepoError::from_persistence(format!(
                    "unknown media type `{other}`"
                )));
            }
        };

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            file_path: row.file_path,
            media_type,
            alternate_text: row.alternate_text,
        })
    }
}

#[async_trait]
impl ProductMediaRepo for PostgresRepositories {
    async fn get(&self, id: Uuid) -> Result<ProductMediaRecord, RepoError> {
        let row = sqlx::query_as::<_, MediaRow>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM product_media WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        ProductMediaRecord::try_from(row)
    }

    async fn list_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductMediaRecord>, RepoError> {
        let rows = sqlx::query_as::<_, MediaRow>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM product_media WHERE product_id = $1 ORDER BY id"
        ))
        .bind(product_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ProductMediaRecord::try_from).collect()
    }

    async fn insert(&self, media: &ProductMediaRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO product_media (id, product_id, file_path, media_type, alternate_text) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(media.id)
        .bind(media.product_id)
        .bind(&media.file_path)
        .bind(media.media_type.as_str())
        .bind(&media.alternate_text)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&self, media: &ProductMediaRecord) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE product_media SET file_path = $2, media_type = $3, alternate_text = $4 \
             WHERE id = $1",
        )
        .bind(media.id)
        .bind(&media.file_path)
        .bind(media.media_type.as_str())
        .bind(&media.alternate_text)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM product_media WHERE id = $1")
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
