//! Request payloads for the catalog endpoints.

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::types::MediaType;

fn default_visible() -> bool {
    true
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct BrandPayload {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub category_id: Uuid,
    #[serde(default)]
    pub brand_url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProductItemPayload {
    pub product_id: Uuid,
    #[serde(default)]
    pub sku: Option<String>,
    pub original_price: i64,
    #[serde(default)]
    pub selling_price: i64,
    #[serde(default)]
    pub inventory: i64,
    #[serde(default = "default_visible")]
    pub is_available: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProductMediaPayload {
    pub product_id: Uuid,
    pub file_path: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub alternate_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductMediaUpdatePayload {
    pub file_path: String,
    #[serde(default)]
    pub alternate_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    pub text: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserCreatePayload {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdatePayload {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
}
