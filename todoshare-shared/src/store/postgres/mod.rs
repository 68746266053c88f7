/// PostgreSQL repositories
///
/// Each repository holds a clone of the shared [`PgPool`](sqlx::PgPool).
/// Every operation that checks a permission and then mutates runs inside a
/// single transaction; the checked row is locked so a concurrent delete or
/// share cannot slip between the check and the write. Dropping an
/// uncommitted transaction rolls it back, so any `?` exit leaves the
/// database unchanged.

mod category;
mod todo;
mod user;

pub use category::PgCategoryRepository;
pub use todo::PgTodoRepository;
pub use user::PgUserRepository;
