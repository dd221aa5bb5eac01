//! User account handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::application::error::AppError;
use crate::application::users::{CreateUserCommand, UpdateUserCommand};

use super::models::{UserCreatePayload, UserUpdatePayload};
use super::{AppState, RequireStaff};

pub async fn list(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<impl IntoResponse, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

pub async fn detail(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.users.get(&username).await?;
    Ok(Json(user))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserCreatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .create(CreateUserCommand {
            username: payload.username,
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            is_staff: payload.is_staff,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(username): Path<String>,
    Json(payload): Json<UserUpdatePayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .update(
            &username,
            UpdateUserCommand {
                email: payload.email,
                first_name: payload.first_name,
                last_name: payload.last_name,
                is_staff: payload.is_staff,
            },
        )
        .await?;
    Ok(Json(user))
}

pub async fn remove(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.users.delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}
