use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, User};
use crate::store::UserRepository;

/// PostgreSQL-backed [`UserRepository`]
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_username(&self, username: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }

    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(user.username)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, "Username"))?;

        info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn share_todo(&self, todo_id: i64, actor: &User, target: &User) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let owner_id: Option<i64> =
            sqlx::query_scalar("SELECT owner_id FROM todos WHERE id = $1 FOR SHARE")
                .bind(todo_id)
                .fetch_optional(&mut *tx)
                .await?;

        match owner_id {
            None => return Err(StoreError::NotFound("Todo".to_string())),
            Some(owner_id) if owner_id != actor.id => {
                debug!(todo_id, user_id = actor.id, "Share rejected: not the owner");
                return Err(StoreError::AccessDenied(
                    "user does not have access to share the todo".to_string(),
                ));
            }
            Some(_) => {}
        }

        let result = sqlx::query(
            r#"
            INSERT INTO user_todos (user_id, todo_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, todo_id) DO NOTHING
            "#,
        )
        .bind(target.id)
        .bind(todo_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            todo_id,
            owner_id = actor.id,
            target_id = target.id,
            newly_shared = result.rows_affected() > 0,
            "Todo shared"
        );
        Ok(())
    }
}
