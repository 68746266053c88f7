/// Category endpoints
///
/// - `POST /auth/category/create` - Create (or reuse) a category by title
/// - `GET /auth/categories` - Categories the user created

use crate::{
    app::AppState,
    error::{ApiError, ApiJson, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use todoshare_shared::{
    auth::middleware::AuthUser,
    models::{Category, NewCategory},
};

/// Create category request
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub title: String,
}

/// Creates a category owned by the user, reusing an existing one with the
/// same title
///
/// # Errors
///
/// - `400 Bad Request`: Empty title
pub async fn create_category(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> ApiResult<Json<Category>> {
    let title = req.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let category = state
        .repos
        .categories
        .upsert(NewCategory {
            title: title.to_string(),
            owner_id: user.id,
        })
        .await?;

    Ok(Json(category))
}

/// Lists the categories the user created
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.repos.categories.list_by_owner(user.id).await?;
    Ok(Json(categories))
}
