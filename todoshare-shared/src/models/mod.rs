/// Domain models for TodoShare
///
/// Plain data types shared by the repositories and the API layer. Storage
/// logic lives in [`crate::store`].
///
/// # Models
///
/// - `user`: Registered accounts
/// - `todo`: Todo items and their update/create inputs
/// - `category`: Per-user categories keyed by `(title, owner_id)`

pub mod category;
pub mod todo;
pub mod user;

pub use category::{Category, NewCategory};
pub use todo::{NewTodo, Todo, TodoUpdate};
pub use user::{NewUser, User};
