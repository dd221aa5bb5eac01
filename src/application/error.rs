use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::cache::CacheStoreError;
use crate::domain::error::DomainError;
use crate::domain::slug::{SlugAsyncError, SlugError};
use crate::infra::error::InfraError;

use super::repos::RepoError;

/// Application-level error, produced by services and mapped to HTTP at the
/// router boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Cache(#[from] CacheStoreError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Slug(#[from] SlugError),
}

impl From<SlugAsyncError<RepoError>> for AppError {
    fn from(error: SlugAsyncError<RepoError>) -> Self {
        match error {
            SlugAsyncError::Slug(err) => Self::Slug(err),
            SlugAsyncError::Predicate(err) => Self::Repo(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(DomainError::NotFound { .. }) | Self::Repo(RepoError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            Self::Domain(DomainError::Validation { .. })
            | Self::Repo(RepoError::Duplicate { .. })
            | Self::Repo(RepoError::InvalidInput { .. })
            | Self::Slug(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repo(RepoError::Integrity { .. }) => StatusCode::CONFLICT,
            Self::Repo(RepoError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    pub fn public_message(&self) -> String {
        match self {
            Self::Domain(DomainError::NotFound { entity }) => format!("{entity} not found"),
            Self::Repo(RepoError::NotFound) => "resource not found".to_string(),
            Self::Domain(DomainError::Validation { message }) => message.clone(),
            Self::Repo(RepoError::Duplicate { constraint }) => {
                format!("a record violating `{constraint}` already exists")
            }
            Self::Repo(RepoError::InvalidInput { message }) => message.clone(),
            Self::Slug(err) => err.to_string(),
            _ => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.public_message() }))).into_response()
    }
}
