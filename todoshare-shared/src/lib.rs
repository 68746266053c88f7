//! # TodoShare Shared Library
//!
//! This crate contains the domain types, storage layer and authentication
//! primitives used by the TodoShare API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, todos and categories
//! - `store`: Repository traits with PostgreSQL and in-memory backends
//! - `auth`: Password hashing, JWT tokens and bearer extraction
//! - `db`: Connection pool and migrations
//! - `error`: Storage error taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

/// Current version of the TodoShare shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
