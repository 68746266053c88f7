/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `auth`: Registration, login and token check
/// - `todos`: Todo CRUD and sharing
/// - `categories`: Category creation and listing

pub mod auth;
pub mod categories;
pub mod todos;
