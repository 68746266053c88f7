//! Common test utilities for router-level tests
//!
//! This module provides shared infrastructure:
//! - An application router backed by the in-memory store
//! - Request helpers driving the router with `tower::ServiceExt::oneshot`
//! - User registration shortcuts returning session tokens

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use todoshare_api::app::{build_router, AppState};
use todoshare_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use todoshare_shared::auth::jwt::DEFAULT_TOKEN_TTL_SECONDS;
use todoshare_shared::store::Repositories;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// A password that satisfies every policy rule
pub const STRONG_PASSWORD: &str = "Passw0rd!";

/// Test context containing the router and the repositories behind it
pub struct TestContext {
    pub app: Router,
    pub repos: Repositories,
    pub config: Config,
}

impl TestContext {
    /// Creates a context with an empty in-memory store
    pub fn new() -> Self {
        let config = test_config();
        let repos = Repositories::in_memory();
        let app = build_router(AppState::new(repos.clone(), config.clone()));

        Self { app, repos, config }
    }

    /// Sends a request and returns the status with the parsed JSON body
    ///
    /// The body is `Value::Null` when the response is empty or not JSON.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers a user with [`STRONG_PASSWORD`] and returns the token
    pub async fn register(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/register",
                None,
                serde_json::json!({ "username": username, "password": STRONG_PASSWORD }),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a todo and returns its ID
    pub async fn create_todo(&self, token: &str, title: &str) -> i64 {
        let (status, body) = self
            .post("/auth/todo/create", Some(token), serde_json::json!({ "title": title }))
            .await;

        assert_eq!(status, StatusCode::OK, "todo creation failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        },
    }
}
