//! # TodoShare API Server Library
//!
//! This library provides the HTTP surface of TodoShare: a multi-user todo
//! list with categories and per-todo sharing.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
