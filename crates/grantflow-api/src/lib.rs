//! HTTP API for grantflow.
//!
//! Handlers, middleware, DTOs, services, and the router. The binary
//! crate wires this router together with configuration, logging, and
//! the OpenAPI document.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::{ApiError, ProblemDetails};
pub use router::{api_router, AppState, DevMode};
