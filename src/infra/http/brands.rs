//! Brand handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::application::brands::{CreateBrandCommand, UpdateBrandCommand};
use crate::application::error::AppError;

use super::models::BrandPayload;
use super::{AppState, RequireStaff};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let brands = state.brands.list().await?;
    Ok(Json(brands))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let brand = state.brands.get(&url).await?;
    Ok(Json(brand))
}

pub async fn create(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<BrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    let brand = state
        .brands
        .create(CreateBrandCommand {
            name: payload.name,
            url: payload.url,
            description: payload.description,
            meta_title: payload.meta_title,
            meta_description: payload.meta_description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(url): Path<String>,
    Json(payload): Json<BrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    let brand = state
        .brands
        .update(
            &url,
            UpdateBrandCommand {
                name: payload.name,
                url: payload.url,
                description: payload.description,
                meta_title: payload.meta_title,
                meta_description: payload.meta_description,
            },
        )
        .await?;
    Ok(Json(brand))
}

pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.brands.delete(&url).await?;
    Ok(StatusCode::NO_CONTENT)
}
