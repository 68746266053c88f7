/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use todoshare_api::{app::{build_router, AppState}, config::Config};
/// use todoshare_shared::db::pool::{create_pool, DatabaseConfig};
/// use todoshare_shared::store::Repositories;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
///
/// let state = AppState::new(Repositories::postgres(pool), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use todoshare_shared::auth::middleware::{authenticate, extract_bearer_token};
use todoshare_shared::store::Repositories;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; both
/// fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// User, todo and category repositories
    pub repos: Repositories,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(repos: Repositories, config: Config) -> Self {
        Self {
            repos,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── POST /register              # Public
/// ├── POST /login                 # Public
/// └── /auth/                      # Bearer token required
///     ├── GET    /todos
///     ├── POST   /todo/create
///     ├── PUT    /todo/:id
///     ├── DELETE /todo/:id
///     ├── POST   /share
///     ├── POST   /category/create
///     ├── GET    /categories
///     └── GET    /check-token
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (`/auth` routes only)
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let protected_routes = Router::new()
        .route("/todos", get(routes::todos::list_todos))
        .route("/todo/create", post(routes::todos::create_todo))
        .route(
            "/todo/:id",
            put(routes::todos::update_todo).delete(routes::todos::delete_todo),
        )
        .route("/share", post(routes::todos::share_todo))
        .route("/category/create", post(routes::categories::create_category))
        .route("/categories", get(routes::categories::list_categories))
        .route("/check-token", get(routes::auth::check_token))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .nest("/auth", protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// JWT authentication middleware layer
///
/// Validates the bearer token, resolves its subject to a stored user and
/// injects [`AuthUser`](todoshare_shared::auth::middleware::AuthUser) into
/// request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers())?.to_owned();

    let auth_user = authenticate(state.repos.users.as_ref(), &token, state.jwt_secret()).await?;

    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}
