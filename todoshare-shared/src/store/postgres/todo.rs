use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, info};

use super::category::upsert_category;
use crate::error::{StoreError, StoreResult};
use crate::models::{Category, NewCategory, NewTodo, Todo, TodoUpdate, User};
use crate::store::TodoRepository;

/// PostgreSQL-backed [`TodoRepository`]
#[derive(Debug, Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A todo row left-joined with its category
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
    owner_id: i64,
    category_id: Option<i64>,
    category_title: Option<String>,
    category_owner_id: Option<i64>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        let category = match (row.category_id, row.category_title, row.category_owner_id) {
            (Some(id), Some(title), Some(owner_id)) => Some(Category { id, title, owner_id }),
            _ => None,
        };

        Todo {
            id: row.id,
            title: row.title,
            completed: row.completed,
            created_at: row.created_at,
            owner_id: row.owner_id,
            category,
        }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, todo: NewTodo) -> StoreResult<Todo> {
        let mut tx = self.pool.begin().await?;

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO todos (title, completed, owner_id)
            VALUES ($1, FALSE, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(&todo.title)
        .bind(todo.owner_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_todos (user_id, todo_id) VALUES ($1, $2)")
            .bind(todo.owner_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(todo_id = id, owner_id = todo.owner_id, "Todo created");

        Ok(Todo {
            id,
            title: todo.title,
            completed: false,
            created_at,
            owner_id: todo.owner_id,
            category: None,
        })
    }

    async fn list_by_user(&self, user_id: i64) -> StoreResult<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT t.id, t.title, t.completed, t.created_at, t.owner_id,
                   c.id AS category_id,
                   c.title AS category_title,
                   c.created_user_id AS category_owner_id
            FROM todos t
            JOIN user_todos ut ON ut.todo_id = t.id
            LEFT JOIN categories c ON c.id = t.category_id
            WHERE ut.user_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn update(&self, update: TodoUpdate, actor: &User) -> StoreResult<Todo> {
        let mut tx = self.pool.begin().await?;

        // Lock the todo row before anything else; delete and share lock it
        // first too, so concurrent mutations queue instead of deadlocking
        let access: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT t.id
            FROM todos t
            JOIN user_todos ut ON ut.todo_id = t.id
            WHERE ut.user_id = $1 AND t.id = $2
            FOR NO KEY UPDATE OF t
            "#,
        )
        .bind(actor.id)
        .bind(update.id)
        .fetch_optional(&mut *tx)
        .await?;

        if access.is_none() {
            debug!(todo_id = update.id, user_id = actor.id, "Update rejected: no access");
            return Err(StoreError::AccessDenied(
                "user does not have access to update the todo".to_string(),
            ));
        }

        let category = match update.category_title() {
            Some(title) => {
                let new_category = NewCategory {
                    title: title.to_string(),
                    owner_id: actor.id,
                };
                Some(upsert_category(&mut *tx, &new_category).await?)
            }
            None => None,
        };

        let row: Option<(i64, String, bool, DateTime<Utc>, i64)> = sqlx::query_as(
            r#"
            UPDATE todos
            SET title = $1, completed = $2, category_id = $3
            WHERE id = $4
            RETURNING id, title, completed, created_at, owner_id
            "#,
        )
        .bind(&update.title)
        .bind(update.completed)
        .bind(category.as_ref().map(|c| c.id))
        .bind(update.id)
        .fetch_optional(&mut *tx)
        .await?;

        let (id, title, completed, created_at, owner_id) =
            row.ok_or_else(|| StoreError::NotFound("Todo".to_string()))?;

        tx.commit().await?;

        Ok(Todo {
            id,
            title,
            completed,
            created_at,
            owner_id,
            category,
        })
    }

    async fn delete(&self, todo_id: i64, actor: &User) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let owner_id: Option<i64> =
            sqlx::query_scalar("SELECT owner_id FROM todos WHERE id = $1 FOR UPDATE")
                .bind(todo_id)
                .fetch_optional(&mut *tx)
                .await?;

        match owner_id {
            None => return Err(StoreError::NotFound("Todo".to_string())),
            Some(owner_id) if owner_id != actor.id => {
                debug!(todo_id, user_id = actor.id, "Delete rejected: not the owner");
                return Err(StoreError::AccessDenied(
                    "user does not have right to delete the todo".to_string(),
                ));
            }
            Some(_) => {}
        }

        // Access rows reference the todo, so they go first
        sqlx::query("DELETE FROM user_todos WHERE todo_id = $1")
            .bind(todo_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(todo_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(todo_id, owner_id = actor.id, "Todo deleted");
        Ok(())
    }

    async fn is_owner(&self, todo_id: i64, user_id: i64) -> StoreResult<bool> {
        let is_owner: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM todos WHERE id = $1 AND owner_id = $2)",
        )
        .bind(todo_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(is_owner)
    }
}
