/// Todo endpoints
///
/// Every handler runs behind the bearer authentication layer and acts as
/// the resolved [`AuthUser`].
///
/// # Endpoints
///
/// - `GET /auth/todos` - Todos the user can access
/// - `POST /auth/todo/create` - Create a todo owned by the user
/// - `PUT /auth/todo/:id` - Update a todo the user can access
/// - `DELETE /auth/todo/:id` - Delete a todo the user owns
/// - `POST /auth/share` - Grant another user access to an owned todo

use crate::{
    app::AppState,
    error::{ApiError, ApiJson, ApiPath, ApiResult},
    routes::auth::MessageResponse,
};
use axum::{
    extract::State,
    Extension, Json,
};
use serde::Deserialize;
use todoshare_shared::{
    auth::middleware::AuthUser,
    models::{NewTodo, Todo, TodoUpdate},
};
use tracing::info;

/// Create todo request
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

/// Category reference in an update body
///
/// Clients send either the bare title or a whole category object; only its
/// title is used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Title(String),
    Object { title: String },
}

impl CategoryRef {
    fn into_title(self) -> String {
        match self {
            CategoryRef::Title(title) | CategoryRef::Object { title } => title,
        }
    }
}

/// Update todo request
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    /// Must match the path ID when present
    pub id: Option<i64>,

    pub title: String,

    pub completed: bool,

    /// Absent, null or blank clears the category
    #[serde(default)]
    pub category: Option<CategoryRef>,
}

/// Share request
#[derive(Debug, Deserialize)]
pub struct ShareTodoRequest {
    /// Todo to share
    pub id: i64,

    /// User to grant access to
    pub username: String,
}

fn require_title(title: &str) -> ApiResult<()> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }
    Ok(())
}

/// Lists every todo the user owns or has been granted access to
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.repos.todos.list_by_user(user.id).await?;
    Ok(Json(todos))
}

/// Creates a todo owned by the user
///
/// # Errors
///
/// - `400 Bad Request`: Empty title
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    require_title(&req.title)?;

    let todo = state
        .repos
        .todos
        .create(NewTodo {
            title: req.title,
            owner_id: user.id,
        })
        .await?;

    Ok(Json(todo))
}

/// Updates title, completion and category of an accessible todo
///
/// The category is resolved among the acting user's own categories and
/// created when missing.
///
/// # Errors
///
/// - `400 Bad Request`: Empty title, or body ID differs from the path ID
/// - `403 Forbidden`: The user has no access to the todo
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    if let Some(body_id) = req.id {
        if body_id != id {
            return Err(ApiError::BadRequest(format!(
                "Todo ID in body ({}) does not match path ({})",
                body_id, id
            )));
        }
    }
    require_title(&req.title)?;

    let update = TodoUpdate {
        id,
        title: req.title,
        completed: req.completed,
        category: req.category.map(CategoryRef::into_title),
    };

    let todo = state.repos.todos.update(update, &user).await?;
    Ok(Json(todo))
}

/// Deletes a todo the user owns
///
/// # Errors
///
/// - `403 Forbidden`: The user is not the owner
/// - `404 Not Found`: No such todo
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    state.repos.todos.delete(id, &user).await?;
    Ok(Json(MessageResponse::new("Todo deleted successfully")))
}

/// Shares a todo the user owns with another user
///
/// # Errors
///
/// - `400 Bad Request`: Missing `id` or `username`
/// - `403 Forbidden`: The user is not the owner
/// - `404 Not Found`: Unknown target user or todo
pub async fn share_todo(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    ApiJson(req): ApiJson<ShareTodoRequest>,
) -> ApiResult<Json<MessageResponse>> {
    if req.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Username is required".to_string()));
    }

    let target = state.repos.users.get_by_username(&req.username).await?;
    state.repos.users.share_todo(req.id, &user, &target).await?;

    info!(todo_id = req.id, from = user.id, to = target.id, "Todo shared");

    Ok(Json(MessageResponse::new("Todo shared successfully")))
}
