/// Storage layer
///
/// Repositories are expressed as capability traits so the backing store can
/// be swapped: [`postgres`] is the production backend, [`memory`] keeps
/// everything in process for tests and local demos.
///
/// # Access model
///
/// - Any user in a todo's access relation may read and update it.
/// - Only the todo's owner may delete or share it.
/// - Categories are upserted by `(title, owner_id)`.
///
/// # Example
///
/// ```no_run
/// use todoshare_shared::models::{NewTodo, NewUser};
/// use todoshare_shared::store::Repositories;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repos = Repositories::in_memory();
///
/// let alice = repos
///     .users
///     .create(NewUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     })
///     .await?;
///
/// let todo = repos
///     .todos
///     .create(NewTodo {
///         title: "buy milk".to_string(),
///         owner_id: alice.id,
///     })
///     .await?;
///
/// assert!(repos.todos.is_owner(todo.id, alice.id).await?);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::models::{Category, NewCategory, NewTodo, NewUser, Todo, TodoUpdate, User};

pub mod memory;
pub mod postgres;

/// Category persistence
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Inserts a category or reuses the row matching `(title, owner_id)`
    async fn upsert(&self, category: NewCategory) -> StoreResult<Category>;

    /// Point lookup; `None` when no row matches
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Category>>;

    /// All categories created by a user, ordered by ID
    async fn list_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Category>>;
}

/// Todo persistence and access checks
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Creates a todo and grants its owner access
    async fn create(&self, todo: NewTodo) -> StoreResult<Todo>;

    /// Every todo the user can access, each with its category resolved
    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Todo>>;

    /// Updates title, completion and category
    ///
    /// Fails with `AccessDenied` unless `actor` is in the access relation.
    /// The category is upserted with `actor` as its owner.
    async fn update(&self, update: TodoUpdate, actor: &User) -> StoreResult<Todo>;

    /// Deletes a todo and its access rows
    ///
    /// Fails with `NotFound` for an unknown todo and `AccessDenied` unless
    /// `actor` owns it.
    async fn delete(&self, todo_id: i64, actor: &User) -> StoreResult<()>;

    /// Whether `user_id` owns `todo_id`
    async fn is_owner(&self, todo_id: i64, user_id: i64) -> StoreResult<bool>;
}

/// User persistence and todo sharing
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `NotFound` when no user has this name
    async fn get_by_username(&self, username: &str) -> StoreResult<User>;

    /// Fails with `Duplicate` when the username is taken
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    /// Grants `target` access to a todo owned by `actor`
    ///
    /// Sharing is idempotent: repeating it, or sharing with the owner, leaves
    /// a single access row.
    async fn share_todo(&self, todo_id: i64, actor: &User, target: &User) -> StoreResult<()>;
}

/// The full set of repositories, constructed once at startup and cloned
/// into request state.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one connection pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepository::new(pool.clone())),
            todos: Arc::new(postgres::PgTodoRepository::new(pool.clone())),
            categories: Arc::new(postgres::PgCategoryRepository::new(pool)),
        }
    }

    /// In-process repositories sharing one [`memory::MemoryStore`]
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            todos: Arc::new(store.clone()),
            categories: Arc::new(store),
        }
    }
}
