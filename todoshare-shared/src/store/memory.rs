/// In-memory repositories for tests and local demos
///
/// [`MemoryStore`] implements all three repository traits over one shared
/// state guarded by a single async mutex, so every repository call is atomic
/// with respect to every other call. Cloning the store shares the state.
///
/// The rules match the PostgreSQL backend:
///
/// - usernames are unique
/// - categories are unique per `(title, owner_id)`
/// - the access relation is a set of `(user_id, todo_id)` pairs
///
/// # Example
///
/// ```
/// use todoshare_shared::models::NewCategory;
/// use todoshare_shared::store::{memory::MemoryStore, CategoryRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let first = store.upsert(NewCategory { title: "home".into(), owner_id: 1 }).await?;
/// let second = store.upsert(NewCategory { title: "home".into(), owner_id: 1 }).await?;
/// assert_eq!(first.id, second.id);
/// # Ok(())
/// # }
/// ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::{Category, NewCategory, NewTodo, NewUser, Todo, TodoUpdate, User};
use crate::store::{CategoryRepository, TodoRepository, UserRepository};

#[derive(Debug, Clone)]
struct TodoRecord {
    id: i64,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
    owner_id: i64,
    category_id: Option<i64>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
    categories: BTreeMap<i64, Category>,
    todos: BTreeMap<i64, TodoRecord>,
    // (user_id, todo_id)
    access: BTreeSet<(i64, i64)>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn upsert_category(&mut self, new: NewCategory) -> Category {
        if let Some(existing) = self
            .categories
            .values_mut()
            .find(|c| c.title == new.title && c.owner_id == new.owner_id)
        {
            existing.title = new.title;
            return existing.clone();
        }

        let category = Category {
            id: self.next_id(),
            title: new.title,
            owner_id: new.owner_id,
        };
        self.categories.insert(category.id, category.clone());
        category
    }

    fn resolve(&self, record: &TodoRecord) -> Todo {
        Todo {
            id: record.id,
            title: record.title.clone(),
            completed: record.completed,
            created_at: record.created_at,
            owner_id: record.owner_id,
            category: record
                .category_id
                .and_then(|id| self.categories.get(&id).cloned()),
        }
    }

    fn owner_of(&self, todo_id: i64) -> StoreResult<i64> {
        self.todos
            .get(&todo_id)
            .map(|t| t.owner_id)
            .ok_or_else(|| StoreError::NotFound("Todo".to_string()))
    }
}

/// Shared in-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of access rows for a todo, owner included
    pub async fn access_count(&self, todo_id: i64) -> usize {
        let state = self.state.lock().await;
        state.access.iter().filter(|(_, t)| *t == todo_id).count()
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn upsert(&self, category: NewCategory) -> StoreResult<Category> {
        let mut state = self.state.lock().await;
        Ok(state.upsert_category(category))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let state = self.state.lock().await;
        Ok(state.categories.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Category>> {
        let state = self.state.lock().await;
        Ok(state
            .categories
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create(&self, todo: NewTodo) -> StoreResult<Todo> {
        let mut state = self.state.lock().await;

        let record = TodoRecord {
            id: state.next_id(),
            title: todo.title,
            completed: false,
            created_at: Utc::now(),
            owner_id: todo.owner_id,
            category_id: None,
        };
        state.access.insert((record.owner_id, record.id));
        state.todos.insert(record.id, record.clone());

        Ok(state.resolve(&record))
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Todo>> {
        let state = self.state.lock().await;
        Ok(state
            .todos
            .values()
            .filter(|t| state.access.contains(&(user_id, t.id)))
            .map(|t| state.resolve(t))
            .collect())
    }

    async fn update(&self, update: TodoUpdate, actor: &User) -> StoreResult<Todo> {
        let mut state = self.state.lock().await;

        if !state.access.contains(&(actor.id, update.id)) {
            return Err(StoreError::AccessDenied(
                "user does not have access to update the todo".to_string(),
            ));
        }

        let category_id = update.category_title().map(|title| {
            state
                .upsert_category(NewCategory {
                    title: title.to_string(),
                    owner_id: actor.id,
                })
                .id
        });

        let record = state
            .todos
            .get_mut(&update.id)
            .ok_or_else(|| StoreError::NotFound("Todo".to_string()))?;
        record.title = update.title;
        record.completed = update.completed;
        record.category_id = category_id;
        let record = record.clone();

        Ok(state.resolve(&record))
    }

    async fn delete(&self, todo_id: i64, actor: &User) -> StoreResult<()> {
        let mut state = self.state.lock().await;

        if state.owner_of(todo_id)? != actor.id {
            return Err(StoreError::AccessDenied(
                "user does not have right to delete the todo".to_string(),
            ));
        }

        state.access.retain(|(_, t)| *t != todo_id);
        state.todos.remove(&todo_id);
        Ok(())
    }

    async fn is_owner(&self, todo_id: i64, user_id: i64) -> StoreResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .todos
            .get(&todo_id)
            .is_some_and(|t| t.owner_id == user_id))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_by_username(&self, username: &str) -> StoreResult<User> {
        let state = self.state.lock().await;
        state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut state = self.state.lock().await;

        if state.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate("Username".to_string()));
        }

        let user = User {
            id: state.next_id(),
            username: user.username,
            password_hash: user.password_hash,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn share_todo(&self, todo_id: i64, actor: &User, target: &User) -> StoreResult<()> {
        let mut state = self.state.lock().await;

        if state.owner_of(todo_id)? != actor.id {
            return Err(StoreError::AccessDenied(
                "user does not have access to share the todo".to_string(),
            ));
        }

        state.access.insert((target.id, todo_id));
        Ok(())
    }
}
