/// Todo model
///
/// A todo has exactly one owner, fixed at creation. Other users gain
/// view/update access through the `user_todos` access relation, which always
/// contains the owner.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     owner_id BIGINT NOT NULL REFERENCES users(id),
///     category_id BIGINT REFERENCES categories(id)
/// );
///
/// CREATE TABLE user_todos (
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     todo_id BIGINT NOT NULL REFERENCES todos(id),
///     PRIMARY KEY (user_id, todo_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// A todo item with its resolved category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Storage-assigned ID
    pub id: i64,

    /// Todo text
    pub title: String,

    /// Whether the todo is done
    pub completed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Creator; the only user allowed to delete or share the todo
    pub owner_id: i64,

    /// Assigned category, if any
    pub category: Option<Category>,
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Todo text
    pub title: String,

    /// Creating user
    pub owner_id: i64,
}

/// Input for updating a todo's content
///
/// `category` carries a category title. It is resolved against the acting
/// user's categories by natural key; `None` (or a blank title) clears the
/// todo's category.
#[derive(Debug, Clone)]
pub struct TodoUpdate {
    /// Todo to update
    pub id: i64,

    /// New title
    pub title: String,

    /// New completion state
    pub completed: bool,

    /// Category title to assign
    pub category: Option<String>,
}

impl TodoUpdate {
    /// Returns the trimmed category title, or `None` when absent or blank
    pub fn category_title(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_with(category: Option<&str>) -> TodoUpdate {
        TodoUpdate {
            id: 1,
            title: "buy milk".to_string(),
            completed: false,
            category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_category_title_trims() {
        assert_eq!(update_with(Some("  home ")).category_title(), Some("home"));
    }

    #[test]
    fn test_blank_category_title_is_none() {
        assert_eq!(update_with(Some("   ")).category_title(), None);
        assert_eq!(update_with(None).category_title(), None);
    }

    #[test]
    fn test_todo_serializes_null_category() {
        let todo = Todo {
            id: 1,
            title: "buy milk".to_string(),
            completed: false,
            created_at: Utc::now(),
            owner_id: 1,
            category: None,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["completed"], false);
        assert!(json["category"].is_null());
    }
}
