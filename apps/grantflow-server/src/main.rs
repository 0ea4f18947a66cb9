//! grantflow HTTP server.
//!
//! Loads configuration, connects to PostgreSQL, runs migrations, and
//! serves the API with structured JSON logging and graceful shutdown.

mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::signal;
use tracing::info;

use grantflow_api::services::{BillingConfig, DraftConfig};
use grantflow_api::{api_router, AppState};
use grantflow_db::{run_migrations, DbPool};

use config::Config;
use health::health_handler;
use openapi::openapi_routes;

#[tokio::main]
async fn main() {
    // Development convenience; absent .env files are fine.
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        env = %config.app_env,
        "Starting grantflow API"
    );

    let pool = match DbPool::connect_with(&config.database_url, config.db_max_connections).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let app = build_app(
        pool,
        config.jwt_secret.clone(),
        !config.app_env.is_production(),
        config.billing.clone(),
        config.draft.clone(),
    );

    let addr = SocketAddr::new(
        config.host.parse().unwrap_or_else(|_| {
            tracing::error!(host = %config.host, "Invalid HOST, falling back to 0.0.0.0");
            std::net::IpAddr::from([0, 0, 0, 0])
        }),
        config.port,
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Assemble the full application router.
fn build_app(
    pool: DbPool,
    jwt_secret: String,
    dev_mode: bool,
    billing: BillingConfig,
    draft: DraftConfig,
) -> Router {
    let state = AppState::new(pool.inner().clone(), jwt_secret, dev_mode, billing, draft);

    Router::new()
        .route("/health", get(health_handler))
        .merge(openapi_routes())
        .merge(api_router(state))
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/grantflow_test")
            .expect("lazy pool construction cannot fail");

        build_app(
            DbPool::from_pool(pool),
            "server-test-signing-secret-32chars!!".to_string(),
            true,
            BillingConfig::default(),
            DraftConfig::default(),
        )
    }

    #[tokio::test]
    async fn health_route_responds() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_route_responds() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
