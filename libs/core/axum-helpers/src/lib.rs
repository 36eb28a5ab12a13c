//! # Axum Helpers
//!
//! Shared building blocks for the GoStay HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT verification, middleware and the [`AuthUser`] extractor
//! - **[`server`]**: router composition, health checks, graceful shutdown
//! - **[`http`]**: security headers and CORS
//! - **[`errors`]**: structured error responses and the `{success, message}` envelope
//! - **[`extractors`]**: validated JSON bodies
//! - **[`audit`]**: audit logging for security-relevant actions
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new()).await?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AuthUser, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware,
};

pub use server::{
    CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{ApiFailure, AppError, ErrorCode, ErrorResponse, FailureBody};

pub use extractors::ValidatedJson;

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
