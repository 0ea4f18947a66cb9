//! Bearer token authentication middleware.
//!
//! Extracts and validates the session token from the Authorization
//! header, then inserts [`Claims`] and [`UserId`] into request
//! extensions for handlers and downstream middleware.

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::{IntoResponse, Response}};

use grantflow_auth::{decode_token, Claims};
use grantflow_core::UserId;

/// Wrapper for the token signing secret so it can live in extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

impl std::fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("JwtSecret").field(&"***").finish()
    }
}

/// Bearer token authentication middleware.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Decodes and validates the session token
/// 3. Inserts [`Claims`] and [`UserId`] into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{middleware, Extension, Router, routing::get};
/// use grantflow_api::middleware::{jwt_auth_middleware, JwtSecret};
///
/// let router = Router::new()
///     .route("/me", get(me_handler))
///     .layer(middleware::from_fn(jwt_auth_middleware))
///     .layer(Extension(JwtSecret("secret".to_string())));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let secret = request
        .extensions()
        .get::<JwtSecret>()
        .ok_or_else(|| {
            tracing::error!("Token signing secret not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
                .into_response()
        })?
        .0
        .clone();

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            (StatusCode::UNAUTHORIZED, "Missing Authorization header").into_response()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header format",
        )
            .into_response()
    })?;

    // Reject empty bearer tokens before attempting decode.
    if token.is_empty() {
        tracing::warn!("Rejected empty bearer token");
        return Err((StatusCode::UNAUTHORIZED, "Empty bearer token").into_response());
    }

    let claims = decode_token(token, secret.as_bytes()).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response()
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!(sub = %claims.sub, "Token subject is not a valid user ID");
        (StatusCode::UNAUTHORIZED, "Invalid token claims").into_response()
    })?;

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(user_id);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::Request as HttpRequest, middleware, routing::get, Extension, Router};
    use grantflow_auth::encode_token;
    use tower::util::ServiceExt;

    const SECRET: &str = "middleware-test-secret";

    async fn me_handler(Extension(user_id): Extension<UserId>) -> String {
        user_id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/me", get(me_handler))
            .layer(middleware::from_fn(jwt_auth_middleware))
            .layer(Extension(JwtSecret(SECRET.to_string())))
    }

    fn bearer_token(secret: &str) -> String {
        let claims = Claims::builder()
            .subject(UserId::new())
            .role("viewer")
            .expires_in_secs(3600)
            .build();
        encode_token(&claims, secret.as_bytes()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_passes() {
        let request = HttpRequest::builder()
            .uri("/me")
            .header("Authorization", format!("Bearer {}", bearer_token(SECRET)))
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_rejected() {
        let request = HttpRequest::builder()
            .uri("/me")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_rejected() {
        let request = HttpRequest::builder()
            .uri("/me")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_bearer_rejected() {
        let request = HttpRequest::builder()
            .uri("/me")
            .header("Authorization", "Bearer ")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_secret_rejected() {
        let request = HttpRequest::builder()
            .uri("/me")
            .header(
                "Authorization",
                format!("Bearer {}", bearer_token("some-other-secret")),
            )
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = JwtSecret("super-secret".to_string());
        let printed = format!("{secret:?}");
        assert!(!printed.contains("super-secret"));
    }
}
