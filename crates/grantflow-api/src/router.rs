//! API router configuration.
//!
//! Routes are grouped by prefix; protected groups attach the bearer
//! auth middleware and admin groups additionally attach the admin
//! guard. Shared services and the signing secret travel through request
//! extensions layered at the top level, which run before any nested
//! middleware.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use sqlx::PgPool;

use crate::handlers::{
    create_application_handler, create_checkout_handler, create_grant_handler,
    delete_application_handler, generate_draft_handler, get_grant_handler, list_applications_handler,
    list_audit_handler, list_grants_handler, login_handler, me_handler, register_handler,
    request_password_reset_handler, reset_password_handler, update_application_handler,
    update_me_handler, verify_handler, webhook_handler,
};
use crate::middleware::{admin_guard, jwt_auth_middleware, JwtSecret};
use crate::services::{
    ApplicationService, AuditService, AuthService, BillingConfig, BillingService, DraftConfig,
    DraftService, GrantService,
};

/// Marker for development mode, where one-time tokens are returned
/// in-band instead of delivered out of band.
#[derive(Debug, Clone, Copy)]
pub struct DevMode(pub bool);

/// Shared application state wired into the router.
#[derive(Clone)]
pub struct AppState {
    /// Account lifecycle service.
    pub auth_service: Arc<AuthService>,
    /// Grant listing service.
    pub grant_service: Arc<GrantService>,
    /// Application service.
    pub application_service: Arc<ApplicationService>,
    /// Audit log read service.
    pub audit_service: Arc<AuditService>,
    /// Billing provider service.
    pub billing_service: Arc<BillingService>,
    /// Draft generation service.
    pub draft_service: Arc<DraftService>,
    /// Token signing secret.
    pub jwt_secret: JwtSecret,
    /// Whether one-time tokens are returned in-band.
    pub dev_mode: DevMode,
}

impl AppState {
    /// Build the state, constructing all services over the pool.
    #[must_use]
    pub fn new(
        pool: PgPool,
        jwt_secret: String,
        dev_mode: bool,
        billing: BillingConfig,
        draft: DraftConfig,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(pool.clone(), jwt_secret.clone())),
            grant_service: Arc::new(GrantService::new(pool.clone())),
            application_service: Arc::new(ApplicationService::new(pool.clone())),
            audit_service: Arc::new(AuditService::new(pool.clone())),
            billing_service: Arc::new(BillingService::new(pool.clone(), billing)),
            draft_service: Arc::new(DraftService::new(draft)),
            jwt_secret: JwtSecret(jwt_secret),
            dev_mode: DevMode(dev_mode),
        }
    }
}

/// Create the full API router.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", users_router())
        .nest("/grants", grants_router())
        .nest("/applications", applications_router())
        .nest("/admin", admin_router())
        .nest("/billing", billing_router())
        .nest("/ai", ai_router())
        .layer(Extension(state.auth_service))
        .layer(Extension(state.grant_service))
        .layer(Extension(state.application_service))
        .layer(Extension(state.audit_service))
        .layer(Extension(state.billing_service))
        .layer(Extension(state.draft_service))
        .layer(Extension(state.jwt_secret))
        .layer(Extension(state.dev_mode))
}

fn users_router() -> Router {
    let public = Router::new()
        .route("/register", post(register_handler))
        .route("/verify", post(verify_handler))
        .route("/login", post(login_handler))
        .route(
            "/request-password-reset",
            post(request_password_reset_handler),
        )
        .route("/reset-password", post(reset_password_handler));

    let protected = Router::new()
        .route("/me", get(me_handler).put(update_me_handler))
        .layer(middleware::from_fn(jwt_auth_middleware));

    public.merge(protected)
}

fn grants_router() -> Router {
    Router::new()
        .route("/", get(list_grants_handler))
        .route("/:id", get(get_grant_handler))
        .layer(middleware::from_fn(jwt_auth_middleware))
}

fn applications_router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_applications_handler).post(create_application_handler),
        )
        .route(
            "/:id",
            put(update_application_handler).delete(delete_application_handler),
        )
        .layer(middleware::from_fn(jwt_auth_middleware))
}

fn admin_router() -> Router {
    Router::new()
        .route("/grants", post(create_grant_handler))
        .route("/audit", get(list_audit_handler))
        // Admin guard runs after bearer auth has inserted the claims.
        .layer(middleware::from_fn(admin_guard))
        .layer(middleware::from_fn(jwt_auth_middleware))
}

fn billing_router() -> Router {
    let protected = Router::new()
        .route("/create-checkout-session", post(create_checkout_handler))
        .layer(middleware::from_fn(jwt_auth_middleware));

    // The webhook authenticates with an HMAC signature, not a bearer
    // token.
    let public = Router::new().route("/webhook", post(webhook_handler));

    protected.merge(public)
}

fn ai_router() -> Router {
    Router::new()
        .route("/generate-application", post(generate_draft_handler))
        .layer(middleware::from_fn(jwt_auth_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn state_without_db() -> AppState {
        // A lazy pool never connects until a query runs, so routing and
        // middleware behavior is testable without a database.
        let pool = PgPool::connect_lazy("postgres://localhost/grantflow_test")
            .expect("lazy pool construction cannot fail");

        AppState::new(
            pool,
            "router-test-secret".to_string(),
            true,
            BillingConfig::default(),
            DraftConfig::default(),
        )
    }

    #[tokio::test]
    async fn protected_routes_require_auth() {
        let app = api_router(state_without_db());

        for (method, uri) in [
            ("GET", "/users/me"),
            ("GET", "/grants"),
            ("GET", "/applications"),
            ("POST", "/billing/create-checkout-session"),
            ("POST", "/ai/generate-application"),
            ("POST", "/admin/grants"),
            ("GET", "/admin/audit"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();

            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{method} {uri} should require authentication"
            );
        }
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = api_router(state_without_db());

        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn webhook_without_signature_is_rejected() {
        let mut billing = BillingConfig::default();
        billing.webhook_secret = Some("whsec_test".to_string());

        let pool = PgPool::connect_lazy("postgres://localhost/grantflow_test").unwrap();
        let state = AppState::new(
            pool,
            "router-test-secret".to_string(),
            true,
            billing,
            DraftConfig::default(),
        );
        let app = api_router(state);

        let request = Request::builder()
            .method("POST")
            .uri("/billing/webhook")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"type":"x","data":{"object":{}}}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
