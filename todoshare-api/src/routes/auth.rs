/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - Register a new user and get a session token
/// - `POST /login` - Login and get a session token
/// - `GET /auth/check-token` - Confirm the bearer token is still valid

use crate::{
    app::AppState,
    error::{ApiError, ApiJson, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use todoshare_shared::{
    auth::{
        jwt::{create_token, Claims},
        middleware::AuthUser,
        password,
    },
    models::NewUser,
};
use tracing::{debug, info};
use validator::Validate;

/// Credentials accepted by both `/register` and `/login`
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Login name
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    /// Plaintext password; only registration applies the strength policy
    pub password: String,
}

/// Session token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT
    pub token: String,
}

/// Plain message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "Passw0rd!" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Username too short or password policy not met;
///   every unmet rule is reported in `details`
/// - `409 Conflict`: Username already exists
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut details = match req.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => match ApiError::from(errors) {
            ApiError::ValidationError(details) => details,
            other => return Err(other),
        },
    };

    if let Err(rules) = password::validate_password_strength(&req.password) {
        details.extend(
            rules
                .iter()
                .map(|rule| ValidationErrorDetail::new("password", rule.message())),
        );
    }

    if !details.is_empty() {
        debug!(username = %req.username, failed = details.len(), "Registration rejected");
        return Err(ApiError::ValidationError(details));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = state
        .repos
        .users
        .create(NewUser {
            username: req.username,
            password_hash,
        })
        .await?;

    let token = create_token(
        &Claims::new(user.username.clone(), state.config.jwt.ttl()),
        state.jwt_secret(),
    )?;

    info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(TokenResponse { token }))
}

/// Login with username and password
///
/// # Errors
///
/// - `400 Bad Request`: Username or password is empty
/// - `404 Not Found`: No such user
/// - `401 Unauthorized`: Wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let mut details = Vec::new();
    if req.username.is_empty() {
        details.push(ValidationErrorDetail::new("username", "Username is required"));
    }
    if req.password.is_empty() {
        details.push(ValidationErrorDetail::new("password", "Password is required"));
    }
    if !details.is_empty() {
        return Err(ApiError::ValidationError(details));
    }

    let user = state.repos.users.get_by_username(&req.username).await?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        debug!(username = %user.username, "Login rejected: wrong password");
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let token = create_token(
        &Claims::new(user.username.clone(), state.config.jwt.ttl()),
        state.jwt_secret(),
    )?;

    info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// Confirms the bearer token is valid
///
/// Reaching the handler means the authentication layer accepted the token.
pub async fn check_token(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<MessageResponse> {
    debug!(user_id = user.id, "Token check passed");
    Json(MessageResponse::new("Token is valid"))
}
