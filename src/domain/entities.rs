//! Persisted catalog records.
//!
//! Records mirror their table rows plus the denormalized fields maintained by
//! the write path (`full_name`, `cheapest_item_id`, comment/like counters).
//! Every record is `Serialize`/`Deserialize` because cached copies round-trip
//! through the cache store as JSON.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::types::{AttributeValue, MediaType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub id: Uuid,
    pub name: String,
    /// URL slug; doubles as the brand's natural identifier in cache keys.
    pub url: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    /// Derived: `parent.full_name / name`, or just `name` at the root.
    pub full_name: String,
    pub url: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub category_id: Uuid,
    pub brand_id: Option<Uuid>,
    /// Brand slug carried redundantly so invalidation can compute
    /// brand-scoped keys without an extra lookup.
    pub brand_url: Option<String>,
    /// Derived: the cheapest in-stock, visible, available item.
    pub cheapest_item_id: Option<Uuid>,
    pub name: String,
    pub url: String,
    pub introduction: String,
    pub review: String,
    pub meta_title: String,
    pub meta_description: String,
    pub is_available: bool,
    pub is_visible: bool,
    pub rating: f64,
    pub comments_count: i64,
    pub views_count: i64,
    pub sold_count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductItemRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub sku: Option<String>,
    /// Prices in minor currency units.
    pub original_price: i64,
    pub selling_price: i64,
    pub inventory: i64,
    pub is_available: bool,
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMediaRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub file_path: String,
    pub media_type: MediaType,
    pub alternate_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRecord {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValueRecord {
    pub id: Uuid,
    pub attribute_id: Uuid,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub text: String,
    pub published: bool,
    /// Derived: set at creation when the author has purchased the product.
    pub is_buyer: bool,
    /// Derived: maintained by atomic store-level increments.
    pub likes_count: i64,
    /// Populated per viewer on read; never persisted or cached.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub liked_by_viewer: Option<bool>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub comment_id: Uuid,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub created_at: OffsetDateTime,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
