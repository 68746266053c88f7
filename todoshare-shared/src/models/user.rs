/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```

use serde::Serialize;

/// A registered account
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Storage-assigned ID
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// Argon2id PHC string (never plaintext)
    #[serde(skip_serializing)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name, unique across all users
    pub username: String,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,
}
