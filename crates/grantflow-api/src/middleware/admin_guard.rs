//! Admin role guard middleware.
//!
//! Checks that the authenticated caller carries the admin role before
//! allowing access to administrative endpoints.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use grantflow_auth::Claims;

use crate::error::ApiError;

/// Middleware that requires the admin role.
///
/// Requires a prior [`jwt_auth_middleware`] to have inserted [`Claims`]
/// into the request extensions.
///
/// # Errors
///
/// - `ApiError::Unauthorized` (401): no claims in request extensions
/// - `ApiError::Forbidden` (403): caller does not hold the admin role
///
/// [`jwt_auth_middleware`]: crate::middleware::jwt_auth_middleware
pub async fn admin_guard(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or(ApiError::Unauthorized)?;

    if !claims.is_admin() {
        tracing::warn!(
            user_id = %claims.sub,
            role = %claims.role,
            "Access denied: admin role required"
        );
        return Err(ApiError::Forbidden);
    }

    tracing::debug!(user_id = %claims.sub, "Admin access granted");

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use grantflow_core::UserId;
    use tower::util::ServiceExt;

    async fn test_handler() -> &'static str {
        "OK"
    }

    fn claims_with_role(role: &str) -> Claims {
        Claims::builder()
            .subject(UserId::new())
            .role(role)
            .expires_in_secs(3600)
            .build()
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(test_handler))
            .layer(middleware::from_fn(admin_guard))
    }

    #[tokio::test]
    async fn allows_admin() {
        let mut request = HttpRequest::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(claims_with_role("admin"));

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn denies_viewer() {
        let mut request = HttpRequest::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(claims_with_role("viewer"));

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn denies_owner() {
        let mut request = HttpRequest::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request.extensions_mut().insert(claims_with_role("owner"));

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn denies_missing_claims() {
        let request = HttpRequest::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
