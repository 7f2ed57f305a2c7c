//! Authentication middleware for Axum
//!
//! Resolves the acting user for every protected request. The token is taken
//! from the `Authorization: Bearer <token>` header, falling back to a `token`
//! cookie, and must be a valid access token.
//!
//! # Request Extensions
//!
//! After successful authentication, middleware adds:
//! - `AuthContext`: Contains the acting user's ID
//!
//! # Example
//!
//! ```no_run
//! use axum::{middleware, routing::get, Router};
//! use kanban_shared::auth::middleware::{create_jwt_middleware, AuthContext};
//!
//! async fn protected_handler(auth: AuthContext) -> String {
//!     format!("Hello, user {}!", auth.user_id)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .layer(middleware::from_fn(create_jwt_middleware("your-jwt-secret")));
//! ```

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};

/// Name of the cookie checked when no Authorization header is present
pub const TOKEN_COOKIE: &str = "token";

/// Authentication context added to request extensions
///
/// Handlers take it directly as an extractor; the extraction fails with
/// 401 when the middleware did not run for the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Acting user ID
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates auth context for a user
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AuthError::MissingCredentials)
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header and no token cookie
    MissingCredentials,

    /// Authorization header present but not a Bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AuthError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Not authorized, no token".to_string(),
            ),
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
        };

        let body = Json(json!({
            "success": false,
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Pulls the raw token out of the request headers
///
/// The Authorization header wins when present. Only when it is absent is
/// the `token` cookie consulted.
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] when neither source carries a token
/// - [`AuthError::InvalidFormat`] when the Authorization header is not `Bearer <token>`
pub fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Malformed Authorization header".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

        return Ok(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .ok_or(AuthError::MissingCredentials)
}

/// JWT authentication middleware
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - No token is presented
/// - Token validation fails
/// - Token has expired or is not an access token
///
/// Returns 400 Bad Request when the Authorization header is malformed.
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_token(req.headers())?;

    let claims = validate_access_token(&token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    tracing::trace!(user_id = %claims.sub, "Request authenticated");
    req.extensions_mut().insert(AuthContext::new(claims.sub));

    Ok(next.run(req).await)
}

/// Creates a JWT authentication middleware closure
///
/// Helper function that captures the secret and returns a middleware
/// function suitable for `axum::middleware::from_fn`.
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>>
       + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}
