//! Comment and like handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::application::comments::{CreateCommentCommand, UpdateCommentCommand};
use crate::application::error::AppError;

use super::models::CommentPayload;
use super::{AppState, RequireStaff, RequireUser, Viewer};

pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<impl IntoResponse, AppError> {
    let comments = state.comments.list().await?;
    Ok(Json(comments))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state.comments.get(id).await?;
    Ok(Json(comment))
}

pub async fn list_for_product(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(url): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.products.get(&url).await?;
    let comments = state
        .comments
        .list_for_product(product.id, viewer.comment_scope(), viewer.user_id)
        .await?;
    Ok(Json(comments))
}

pub async fn create(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Path(url): Path<String>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.products.get(&url).await?;
    let comment = state
        .comments
        .create(CreateCommentCommand {
            user_id,
            product_id: product.id,
            text: payload.text,
            published: payload.published,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
    Json(payload): Json<CommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let comment = state
        .comments
        .update(
            id,
            UpdateCommentCommand {
                text: payload.text,
                published: payload.published,
            },
        )
        .await?;
    Ok(Json(comment))
}

pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.comments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn like(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let like = state.likes.like(user_id, id).await?;
    Ok((StatusCode::CREATED, Json(like)))
}

pub async fn unlike(
    State(state): State<AppState>,
    RequireUser(user_id): RequireUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.likes.unlike(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
