/// Category model
///
/// Categories belong to the user who created them and are identified by
/// their natural key `(title, owner_id)`: upserting an existing pair reuses
/// the stored row instead of creating a duplicate.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     created_user_id BIGINT NOT NULL REFERENCES users(id),
///     UNIQUE (title, created_user_id)
/// );
/// ```

use serde::{Deserialize, Serialize};

/// A user-owned category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Storage-assigned ID
    pub id: i64,

    /// Display title, unique per owner
    pub title: String,

    /// ID of the user who created the category
    #[serde(rename = "created_user_id")]
    #[sqlx(rename = "created_user_id")]
    pub owner_id: i64,
}

/// Input for [`CategoryRepository::upsert`](crate::store::CategoryRepository::upsert)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Category title
    pub title: String,

    /// Owning user
    pub owner_id: i64,
}
