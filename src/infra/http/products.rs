//! Product, product-item, and product-media handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::application::error::AppError;
use crate::application::products::{
    CreateProductCommand, CreateProductItemCommand, CreateProductMediaCommand,
    UpdateProductCommand, UpdateProductItemCommand,
};

use super::models::{
    ProductItemPayload, ProductMediaPayload, ProductMediaUpdatePayload, ProductPayload,
};
use super::{AppState, RequireStaff, Viewer};

pub async fn list(
    State(state): State<AppState>,
    viewer: Viewer,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products.list(viewer.list_scope()).await?;
    Ok(Json(products))
}

pub async fn list_by_category(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let products = state
        .products
        .list_by_category(id, viewer.list_scope())
        .await?;
    Ok(Json(products))
}

pub async fn list_by_brand(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let products = state
        .products
        .list_by_brand(&url, viewer.list_scope())
        .await?;
    Ok(Json(products))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.products.get(&url).await?;
    Ok(Json(product))
}

pub async fn create(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .products
        .create(CreateProductCommand {
            category_id: payload.category_id,
            brand_url: payload.brand_url,
            name: payload.name,
            url: payload.url,
            introduction: payload.introduction,
            review: payload.review,
            meta_title: payload.meta_title,
            meta_description: payload.meta_description,
            is_visible: payload.is_visible,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(url): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .products
        .update(
            &url,
            UpdateProductCommand {
                category_id: payload.category_id,
                brand_url: payload.brand_url,
                name: payload.name,
                url: payload.url,
                introduction: payload.introduction,
                review: payload.review,
                meta_title: payload.meta_title,
                meta_description: payload.meta_description,
                is_visible: payload.is_visible,
            },
        )
        .await?;
    Ok(Json(product))
}

pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.products.delete(&url).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_items(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<impl IntoResponse, AppError> {
    let items = state.items.list().await?;
    Ok(Json(items))
}

pub async fn item_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.items.get(id).await?;
    Ok(Json(item))
}

pub async fn create_item(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<ProductItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = state
        .items
        .create(CreateProductItemCommand {
            product_id: payload.product_id,
            sku: payload.sku,
            original_price: payload.original_price,
            selling_price: payload.selling_price,
            inventory: payload.inventory,
            is_available: payload.is_available,
            is_visible: payload.is_visible,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = state
        .items
        .update(
            id,
            UpdateProductItemCommand {
                product_id: payload.product_id,
                sku: payload.sku,
                original_price: payload.original_price,
                selling_price: payload.selling_price,
                inventory: payload.inventory,
                is_available: payload.is_available,
                is_visible: payload.is_visible,
            },
        )
        .await?;
    Ok(Json(item))
}

pub async fn remove_item(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.items.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_media(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.products.get(&url).await?;
    let media = state.media.list_for_product(product.id).await?;
    Ok(Json(media))
}

pub async fn create_media(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<ProductMediaPayload>,
) -> Result<impl IntoResponse, AppError> {
    let media = state
        .media
        .create(CreateProductMediaCommand {
            product_id: payload.product_id,
            file_path: payload.file_path,
            media_type: payload.media_type,
            alternate_text: payload.alternate_text,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(media)))
}

pub async fn update_media(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductMediaUpdatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let media = state
        .media
        .replace_file(id, payload.file_path, payload.alternate_text)
        .await?;
    Ok(Json(media))
}

pub async fn remove_media(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.media.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
