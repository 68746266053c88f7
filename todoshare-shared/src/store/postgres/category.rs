use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;

use crate::error::StoreResult;
use crate::models::{Category, NewCategory};
use crate::store::CategoryRepository;

/// PostgreSQL-backed [`CategoryRepository`]
#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Upserts by natural key in one statement.
///
/// Shared with the todo repository so a todo update can resolve its
/// category inside the same transaction.
pub(super) async fn upsert_category<'e, E>(
    executor: E,
    category: &NewCategory,
) -> Result<Category, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (title, created_user_id)
        VALUES ($1, $2)
        ON CONFLICT (title, created_user_id) DO UPDATE SET title = EXCLUDED.title
        RETURNING id, title, created_user_id
        "#,
    )
    .bind(&category.title)
    .bind(category.owner_id)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn upsert(&self, category: NewCategory) -> StoreResult<Category> {
        let category = upsert_category(&self.pool, &category).await?;
        debug!(category_id = category.id, owner_id = category.owner_id, "Category upserted");
        Ok(category)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, title, created_user_id FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, created_user_id
            FROM categories
            WHERE created_user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
