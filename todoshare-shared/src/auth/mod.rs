/// Authentication utilities
///
/// This module provides the authentication primitives for TodoShare:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the password policy
/// - [`jwt`]: JWT session token issuing and validation
/// - [`middleware`]: Bearer token extraction and authentication errors
///
/// # Example
///
/// ```no_run
/// use todoshare_shared::auth::password::{hash_password, verify_password};
/// use todoshare_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Passw0rd!")?;
/// assert!(verify_password("Passw0rd!", &hash)?);
///
/// let claims = Claims::new("alice", Duration::hours(24));
/// let token = create_token(&claims, "secret-key")?;
/// assert_eq!(validate_token(&token, "secret-key")?.sub, "alice");
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
