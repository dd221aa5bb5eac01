//! Category handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::application::categories::{CreateCategoryCommand, UpdateCategoryCommand};
use crate::application::error::AppError;

use super::models::CategoryPayload;
use super::{AppState, RequireStaff};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let category = state.categories.get(id).await?;
    Ok(Json(category))
}

pub async fn attributes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let attributes = state.categories.attributes(id).await?;
    Ok(Json(attributes))
}

pub async fn create(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let category = state
        .categories
        .create(CreateCategoryCommand {
            parent_id: payload.parent_id,
            name: payload.name,
            url: payload.url,
            description: payload.description,
            meta_title: payload.meta_title,
            meta_description: payload.meta_description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let category = state
        .categories
        .update(
            id,
            UpdateCategoryCommand {
                parent_id: payload.parent_id,
                name: payload.name,
                url: payload.url,
                description: payload.description,
                meta_title: payload.meta_title,
                meta_description: payload.meta_description,
            },
        )
        .await?;
    Ok(Json(category))
}

pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
