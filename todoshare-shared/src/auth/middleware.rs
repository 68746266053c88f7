/// Bearer token authentication helpers for Axum
///
/// The API server's authentication layer uses these helpers to pull the
/// token out of the `Authorization: Bearer <token>` header, validate it and
/// resolve the subject to a stored [`User`](crate::models::User). The
/// resolved user is placed in request extensions as an [`AuthUser`].
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use todoshare_shared::auth::middleware::extract_bearer_token;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
///
/// assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::jwt::{validate_token, JwtError};
use crate::models::User;
use crate::store::UserRepository;
use crate::error::StoreError;

/// The authenticated user, added to request extensions after successful
/// authentication
///
/// ```
/// use axum::Extension;
/// use todoshare_shared::auth::middleware::AuthUser;
///
/// async fn handler(Extension(AuthUser(user)): Extension<AuthUser>) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Error type for authentication
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token validation failed, or its subject no longer exists
    InvalidToken(String),

    /// Storage failure while resolving the subject
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Extracts the raw token from an `Authorization: Bearer <token>` header
///
/// # Errors
///
/// - `AuthError::MissingCredentials` when the header is absent or not UTF-8
/// - `AuthError::InvalidFormat` for any scheme other than Bearer
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(token)
}

/// Validates a bearer token and resolves its subject to a stored user
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for an invalid or expired token and
/// for a token whose user no longer exists.
pub async fn authenticate(
    users: &dyn UserRepository,
    token: &str,
    secret: &str,
) -> Result<AuthUser, AuthError> {
    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken("Invalid token".to_string()),
    })?;

    match users.get_by_username(&claims.sub).await {
        Ok(user) => Ok(AuthUser(user)),
        Err(StoreError::NotFound(_)) => {
            Err(AuthError::InvalidToken("Unknown token subject".to_string()))
        }
        Err(e) => Err(AuthError::DatabaseError(e.to_string())),
    }
}
