//! Storage error taxonomy
//!
//! Every repository operation returns [`StoreResult`]. The variants separate
//! user-actionable outcomes (missing rows, uniqueness conflicts, missing
//! permissions) from infrastructure failures so the API layer can map each
//! one to its own HTTP status.

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested row does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness constraint was violated
    #[error("{0} already exists")]
    Duplicate(String),

    /// The acting user is authenticated but lacks the required capability
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Underlying database failure
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Repository result type alias
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Maps a unique-constraint violation to [`StoreError::Duplicate`],
    /// passing every other database error through as [`StoreError::Storage`].
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate(what.to_string());
            }
        }
        StoreError::Storage(err)
    }
}
