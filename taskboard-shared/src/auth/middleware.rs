/// Bearer authentication support for Axum
///
/// The API server installs a middleware layer (see the api crate's
/// `app.rs`) that parses the Authorization header, validates the JWT, and
/// inserts an [`AuthContext`] into request extensions. Handlers extract
/// it with Axum's `Extension` extractor — there is no anonymous access
/// path to any project or task route.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskboard_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated-request context added to request extensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the token's subject claim)
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_jwt(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

/// Error type for the authentication middleware
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing Authorization header
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not a Bearer scheme
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::UNAUTHORIZED,
        };
        (status, self.to_string()).into_response()
    }
}

/// Extracts the bearer token from an Authorization header value
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if the header is absent
/// - `AuthError::InvalidFormat` if the scheme is not `Bearer`
pub fn bearer_token(auth_header: Option<&str>) -> Result<&str, AuthError> {
    let header = auth_header.ok_or(AuthError::MissingCredentials)?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parses() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(bearer_token(None), Err(AuthError::MissingCredentials)));
    }

    #[test]
    fn test_wrong_scheme() {
        let result = bearer_token(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(result, Err(AuthError::InvalidFormat(_))));
    }
}
