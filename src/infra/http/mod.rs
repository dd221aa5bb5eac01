//! HTTP surface: router, shared state, and caller identity extraction.

mod brands;
mod categories;
mod comments;
mod models;
mod products;
mod users;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;
use uuid::Uuid;

use crate::application::{
    brands::BrandService,
    categories::CategoryService,
    comments::{CommentService, LikeService},
    products::{ProductItemService, ProductMediaService, ProductService},
    users::UserService,
};
use crate::domain::types::{CommentScope, ListScope};

use super::db::PostgresRepositories;

/// Identity headers set by the fronting auth proxy. The service itself does
/// no credential verification.
const USER_ID_HEADER: &str = "x-user-id";
const STAFF_HEADER: &str = "x-staff";

#[derive(Clone)]
pub struct AppState {
    pub brands: BrandService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub items: ProductItemService,
    pub media: ProductMediaService,
    pub comments: CommentService,
    pub likes: LikeService,
    pub users: UserService,
    pub db: Arc<PostgresRepositories>,
}

/// Caller identity resolved from proxy headers; absent headers mean an
/// anonymous public caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer {
    pub user_id: Option<Uuid>,
    pub is_staff: bool,
}

impl Viewer {
    pub fn list_scope(&self) -> ListScope {
        ListScope::for_staff(self.is_staff)
    }

    pub fn comment_scope(&self) -> CommentScope {
        if self.is_staff {
            CommentScope::All
        } else {
            CommentScope::Published
        }
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());

        let is_staff = parts
            .headers
            .get(STAFF_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1");

        Ok(Viewer { user_id, is_staff })
    }
}

/// Extractor for operations that need a signed-in caller.
pub struct RequireUser(pub Uuid);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let viewer = Viewer::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        viewer.user_id.map(RequireUser).ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "authentication required" })),
        ))
    }
}

/// Extractor for staff-only operations.
pub struct RequireStaff;

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let viewer = Viewer::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        if viewer.is_staff {
            Ok(RequireStaff)
        } else {
            Err((
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": "staff access required" })),
            ))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health/db", get(db_health))
        .route("/brands", get(brands::list).post(brands::create))
        .route(
            "/brands/{url}",
            get(brands::detail)
                .put(brands::update)
                .delete(brands::remove),
        )
        .route("/brands/{url}/products", get(products::list_by_brand))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            get(categories::detail)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route(
            "/categories/{id}/products",
            get(products::list_by_category),
        )
        .route(
            "/categories/{id}/attributes",
            get(categories::attributes),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{url}",
            get(products::detail)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/products/{url}/media", get(products::list_media))
        .route(
            "/products/{url}/comments",
            get(comments::list_for_product).post(comments::create),
        )
        .route(
            "/product-items",
            get(products::list_items).post(products::create_item),
        )
        .route(
            "/product-items/{id}",
            get(products::item_detail)
                .put(products::update_item)
                .delete(products::remove_item),
        )
        .route("/product-media", post(products::create_media))
        .route(
            "/product-media/{id}",
            put(products::update_media).delete(products::remove_media),
        )
        .route("/comments", get(comments::list))
        .route(
            "/comments/{id}",
            get(comments::detail)
                .put(comments::update)
                .delete(comments::remove),
        )
        .route(
            "/comments/{id}/like",
            post(comments::like).delete(comments::unlike),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/{username}",
            get(users::detail).put(users::update).delete(users::remove),
        )
        .with_state(state)
}

async fn db_health(State(state): State<AppState>) -> Response {
    match state.db.health_check().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "detail": err.to_string() })),
        )
            .into_response(),
    }
}
